//! Unit tests for Symbol and SymbolTable

use core_types::{DataType, Symbol, SymbolTable, GLOBAL_SCOPE};

#[cfg(test)]
mod symbol_tests {
    use super::*;

    #[test]
    fn test_new_symbol_has_no_value() {
        let sym = Symbol::new("count", DataType::Long, 3);

        assert_eq!(sym.name, "count");
        assert_eq!(sym.data_type, DataType::Long);
        assert_eq!(sym.scope, GLOBAL_SCOPE);
        assert_eq!(sym.line, 3);
        assert_eq!(sym.value(), None);
    }

    #[test]
    fn test_unset_value_renders_na() {
        let sym = Symbol::new("avg", DataType::Double, 1);
        assert!(sym.to_string().ends_with("| N/A"));
    }

    #[test]
    fn test_data_type_names() {
        assert_eq!(DataType::Long.to_string(), "LONG");
        assert_eq!(DataType::Double.to_string(), "DOUBLE");
        assert_eq!(format!("{:<8}|", DataType::Long), "LONG    |");
    }
}

#[cfg(test)]
mod symbol_table_tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let table = SymbolTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.get("a").is_none());
    }

    #[test]
    fn test_first_declaration_wins() {
        let mut table = SymbolTable::new();
        assert!(table.insert(Symbol::new("a", DataType::Long, 1)).is_ok());
        assert!(table.insert(Symbol::new("a", DataType::Double, 2)).is_err());

        let sym = table.get("a").unwrap();
        assert_eq!(sym.data_type, DataType::Long);
        assert_eq!(sym.line, 1);
    }

    #[test]
    fn test_set_and_clear_value() {
        let mut table = SymbolTable::new();
        table.insert(Symbol::new("d", DataType::Double, 1)).unwrap();

        assert!(table.set_value("d", Some("3".to_string())));
        assert_eq!(table.get("d").unwrap().value(), Some("3"));

        assert!(table.set_value("d", None));
        assert_eq!(table.get("d").unwrap().value(), None);
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut table = SymbolTable::new();
        for (i, name) in ["z", "m", "a"].iter().enumerate() {
            table.insert(Symbol::new(*name, DataType::Long, i as u32 + 1)).unwrap();
        }
        let names: Vec<&str> = (&table).into_iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["z", "m", "a"]);
    }

    #[test]
    fn test_header_aligns_with_rows() {
        let header = SymbolTable::header();
        let row = Symbol::new("a", DataType::Long, 1).to_string();
        assert_eq!(header.find('|'), row.find('|'));
    }

    #[test]
    fn test_table_serializes_as_list() {
        let mut table = SymbolTable::new();
        table.insert(Symbol::new("a", DataType::Long, 1)).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json[0]["name"], "a");
        assert_eq!(json[0]["data_type"], "LONG");
        assert_eq!(json[0]["scope"], "global");
        assert!(json[0]["value"].is_null());
    }
}
