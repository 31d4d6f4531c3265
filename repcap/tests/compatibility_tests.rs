//! Compatibility test suite
//!
//! Runs expanded patterns through the host engine and checks that every
//! repetition of a quantified group lands in its own capture slot.

use repcap::{AliasRegistry, CaptureList, CompiledPattern, PatternFlags, Regex};

fn compile(pattern: &str, ceiling: usize) -> Regex {
    Regex::with_registry(pattern, &AliasRegistry::new(), ceiling).unwrap()
}

mod repetition_captures {
    use super::*;

    #[test]
    fn test_plus_captures_each_repetition() {
        let regex = compile(r"(\w)+", 5);
        let caps = regex.captures("abc").unwrap();
        assert_eq!(caps.filter(true), Some(vec![Some("a"), Some("b"), Some("c")]));
    }

    #[test]
    fn test_host_engine_alone_keeps_last() {
        let host = fancy_regex::Regex::new(r"(\w)+").unwrap();
        let caps = CaptureList::from_captures(host.captures("abc").unwrap());
        assert_eq!(caps.filter(true), Some(vec![Some("c")]));
    }

    #[test]
    fn test_ceiling_limits_captures() {
        let regex = compile(r"(\w)+", 2);
        let caps = regex.captures("abcd").unwrap();
        assert_eq!(caps.full_match(), Some("ab"));
        assert_eq!(caps.filter(true), Some(vec![Some("a"), Some("b")]));
    }

    #[test]
    fn test_range_leaves_empty_optional_slots() {
        let regex = compile(r"^(\d){2,4}$", 12);
        let caps = regex.captures("123").unwrap();
        assert_eq!(
            caps.filter(false),
            Some(vec![Some("1"), Some("2"), Some("3"), None])
        );
        assert!(!regex.is_match("1").unwrap());
        assert!(!regex.is_match("12345").unwrap());
    }

    #[test]
    fn test_words_and_separators() {
        let regex = compile(r"^(\w+)(,)?(\w+)(,)?(\w+)$", 12);
        let caps = regex.captures("one,two,three").unwrap();
        assert_eq!(caps.skip(0, 1), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_skip_over_expanded_pairs() {
        let regex = compile(r"^(?:(\w+)(;))+$", 4);
        let caps = regex.captures("a;bb;ccc;").unwrap();
        assert_eq!(caps.skip(0, 1), vec!["a", "bb", "ccc"]);
        assert_eq!(caps.skip(1, 0), vec![";", ";", ";"]);
    }

    #[test]
    fn test_non_capturing_copies_add_no_slots() {
        let regex = compile(r"(?:a)+(b)", 3);
        let caps = regex.captures("aab").unwrap();
        assert_eq!(caps.len(), 2);
        assert_eq!(caps.filter(true), Some(vec![Some("b")]));
    }

    #[test]
    fn test_inline_flags_preserved() {
        let regex = compile(r"(?i)(a)+", 3);
        let caps = regex.captures("AaA").unwrap();
        assert_eq!(caps.filter(true), Some(vec![Some("A"), Some("a"), Some("A")]));
    }

    #[test]
    fn test_compiled_flags_preserved() {
        let flags = PatternFlags::new().case_insensitive(true);
        let compiled = CompiledPattern::new("(a)+", flags).unwrap();
        let regex = Regex::with_registry(&compiled, &AliasRegistry::new(), 3).unwrap();
        assert_eq!(regex.as_str(), "(?i)(a)(a)?(a)?");
        assert!(regex.is_match("AA").unwrap());

        let caps = regex.captures("aA").unwrap();
        assert_eq!(caps.filter(true), Some(vec![Some("a"), Some("A")]));
    }

    #[test]
    fn test_compiled_multi_line_preserved() {
        let flags = PatternFlags::new().multi_line(true);
        let compiled = CompiledPattern::new(r"^(\d)+$", flags).unwrap();
        let regex = Regex::with_registry(&compiled, &AliasRegistry::new(), 3).unwrap();
        let caps = regex.captures("x\n12\ny").unwrap();
        assert_eq!(caps.full_match(), Some("12"));
    }

    #[test]
    fn test_filter_with_predicate() {
        let regex = compile(r"(\d|-)+", 6);
        let caps = regex.captures("1-2-3").unwrap();
        let digits = caps.filter_with(true, |slot| slot == Some("-"));
        assert_eq!(digits, Some(vec![Some("1"), Some("2"), Some("3")]));
    }
}

mod aliases {
    use super::*;

    #[test]
    fn test_alias_pattern_matches() {
        let mut registry = AliasRegistry::new();
        registry.set_aliasing(true);
        registry.register("octet", r"\d{1,3}").unwrap();
        registry.register("ip", r"(@octet)(?:\.(@octet)){3}").unwrap();

        let regex = Regex::with_registry("^@ip$", &registry, 12).unwrap();
        let caps = regex.captures("10.0.255.7").unwrap();
        assert_eq!(
            caps.filter(true),
            Some(vec![Some("10"), Some("0"), Some("255"), Some("7")])
        );
    }

    #[test]
    fn test_named_alias_groups() {
        let mut registry = AliasRegistry::new();
        registry.set_aliasing(true);
        registry.set_named_alias_groups(true);
        registry.register("year", r"\d{4}").unwrap();
        registry.register("month", r"\d{2}").unwrap();

        let regex = Regex::with_registry("@year-@month", &registry, 12).unwrap();
        assert_eq!(regex.as_str(), r"(?<year>\d{4})-(?<month>\d{2})");

        let caps = regex.host().captures("2024-05").unwrap().unwrap();
        assert_eq!(caps.name("year").map(|m| m.as_str()), Some("2024"));
        assert_eq!(caps.name("month").map(|m| m.as_str()), Some("05"));
    }
}
