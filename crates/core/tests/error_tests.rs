// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use stock_dashboard_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("Symbol is required".into());
        assert_eq!(err.to_string(), "Validation failed: Symbol is required");
    }

    #[test]
    fn position_not_found() {
        let err = CoreError::PositionNotFound("42".into());
        assert_eq!(err.to_string(), "Position not found: 42");
    }

    #[test]
    fn watchlist_item_not_found() {
        let err = CoreError::WatchlistItemNotFound("w-1".into());
        assert_eq!(err.to_string(), "Watchlist item not found: w-1");
    }

    #[test]
    fn duplicate_id() {
        let err = CoreError::DuplicateId("1".into());
        assert_eq!(err.to_string(), "Duplicate id: 1");
    }

    #[test]
    fn market_data() {
        let err = CoreError::MarketData {
            provider: "Mock Market".into(),
            message: "No price returned for ZZZZ".into(),
        };
        assert_eq!(
            err.to_string(),
            "Market data error (Mock Market): No price returned for ZZZZ"
        );
    }

    #[test]
    fn market_data_empty_provider() {
        let err = CoreError::MarketData {
            provider: String::new(),
            message: "timeout".into(),
        };
        assert_eq!(err.to_string(), "Market data error (): timeout");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("key must be a string".into());
        assert_eq!(err.to_string(), "Serialization error: key must be a string");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: EOF");
    }
}

// ── Debug trait ─────────────────────────────────────────────────────

mod debug_trait {
    use super::*;

    #[test]
    fn all_variants_are_debug() {
        let variants = vec![
            CoreError::ValidationError("v".into()),
            CoreError::PositionNotFound("p".into()),
            CoreError::WatchlistItemNotFound("w".into()),
            CoreError::DuplicateId("d".into()),
            CoreError::MarketData {
                provider: "x".into(),
                message: "y".into(),
            },
            CoreError::Serialization("s".into()),
            CoreError::Deserialization("d".into()),
        ];
        for v in variants {
            assert!(!format!("{v:?}").is_empty());
        }
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
        assert!(err.to_string().starts_with("Deserialization error:"));
    }

    #[test]
    fn question_mark_converts_serde_json_error() {
        fn parse(input: &str) -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str(input)?)
        }
        assert!(parse("[1, 2").is_err());
        assert!(parse("[1, 2]").is_ok());
    }
}

// ── std::error::Error ───────────────────────────────────────────────

mod std_error {
    use super::*;

    #[test]
    fn core_error_implements_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::DuplicateId("1".into()));
        assert_eq!(err.to_string(), "Duplicate id: 1");
    }

    #[test]
    fn core_error_implements_send() {
        fn assert_send<T: Send>() {}
        assert_send::<CoreError>();
    }

    #[test]
    fn core_error_implements_sync() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<CoreError>();
    }
}

// ── Edge cases ──────────────────────────────────────────────────────

mod edge_cases {
    use super::*;

    #[test]
    fn unicode_in_error_message() {
        let err = CoreError::ValidationError("Symbol 'ÄÖÜ' is not listed".into());
        assert!(err.to_string().contains("ÄÖÜ"));
    }

    #[test]
    fn very_long_error_message() {
        let long = "x".repeat(10_000);
        let err = CoreError::PositionNotFound(long.clone());
        assert!(err.to_string().ends_with(&long));
    }
}
