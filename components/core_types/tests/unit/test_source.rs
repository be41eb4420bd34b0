//! Unit tests for SourcePosition

use core_types::SourcePosition;

#[cfg(test)]
mod source_position_tests {
    use super::*;

    #[test]
    fn test_source_position_creation() {
        let pos = SourcePosition::new(10, 5);

        assert_eq!(pos.line, 10);
        assert_eq!(pos.column, 5);
    }

    #[test]
    fn test_source_position_large_values() {
        let pos = SourcePosition::new(u32::MAX, u32::MAX);

        assert_eq!(pos.line, u32::MAX);
        assert_eq!(pos.column, u32::MAX);
    }

    #[test]
    fn test_source_position_copy() {
        let pos1 = SourcePosition::new(42, 7);
        let pos2 = pos1;

        assert_eq!(pos1, pos2);
    }

    #[test]
    fn test_source_position_equality() {
        assert_eq!(SourcePosition::new(1, 2), SourcePosition::new(1, 2));
        assert_ne!(SourcePosition::new(1, 2), SourcePosition::new(2, 1));
    }

    #[test]
    fn test_source_position_display() {
        assert_eq!(SourcePosition::new(3, 14).to_string(), "3:14");
    }

    #[test]
    fn test_source_position_serializes_fields() {
        let json = serde_json::to_string(&SourcePosition::new(4, 9)).unwrap();
        assert_eq!(json, r#"{"line":4,"column":9}"#);
    }
}
