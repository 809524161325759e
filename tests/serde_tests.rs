//! Tests for serde serialization/deserialization.
//!
//! Run lists are exchanged as JSON arrays of `{"value", "length"}` objects;
//! driver configuration uses kebab-case variant names.

#![cfg(feature = "serde")]

use rangebits::{Run, SetterKind, UnionConfig, Unroll, union_runs};

// ============================================================================
// Run serialization tests
// ============================================================================

mod run_serde {
    use super::*;

    #[test]
    fn test_run_json_shape() {
        let json = serde_json::to_string(&Run::new(70, 5)).unwrap();
        assert_eq!(json, r#"{"value":70,"length":5}"#);
    }

    #[test]
    fn test_run_list_roundtrip_applies_identically() {
        let runs = vec![Run::new(0, 2), Run::new(10, 0), Run::new(70, 5)];
        let json = serde_json::to_string(&runs).unwrap();
        let restored: Vec<Run> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, runs);

        let mut a = [0u64; 2];
        let mut b = [0u64; 2];
        union_runs(&mut a, &runs).unwrap();
        union_runs(&mut b, &restored).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_rejects_out_of_domain_value() {
        let result: Result<Run, _> = serde_json::from_str(r#"{"value":65536,"length":0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_rejects_missing_field() {
        let result: Result<Run, _> = serde_json::from_str(r#"{"value":1}"#);
        assert!(result.is_err());
    }
}

// ============================================================================
// UnionConfig serialization tests
// ============================================================================

mod config_serde {
    use super::*;

    #[test]
    fn test_config_json_shape() {
        let config = UnionConfig::new(SetterKind::HalfOpen, Unroll::Four);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"setter":"half-open","unroll":"four"}"#);
    }

    #[test]
    fn test_config_roundtrip_all() {
        for config in UnionConfig::ALL {
            let json = serde_json::to_string(&config).unwrap();
            let restored: UnionConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(restored, config);
        }
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: UnionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, UnionConfig::default());

        let config: UnionConfig = serde_json::from_str(r#"{"unroll":"two"}"#).unwrap();
        assert_eq!(config.setter, SetterKind::LengthOffset);
        assert_eq!(config.unroll, Unroll::Two);
    }
}
