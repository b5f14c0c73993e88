//! SQL rendition of the target scope filters.
//!
//! The region/city predicate is always rendered as the same static SQL
//! fragment. Unused filters are switched off through their bind values
//! rather than by assembling different query text.

use callplan_core::region::EligibilityPredicate;
use callplan_core::types::DbId;

/// Bind values for [`scope_sql`], in placeholder order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeBinds {
    pub region_filter: bool,
    pub virtual_caller_ids: Vec<DbId>,
    pub special_category: bool,
    pub geographic: Vec<String>,
    pub city_patterns: Vec<String>,
}

impl From<&EligibilityPredicate> for ScopeBinds {
    fn from(predicate: &EligibilityPredicate) -> Self {
        Self {
            region_filter: predicate.has_region_filter(),
            virtual_caller_ids: predicate.virtual_caller_ids.clone(),
            special_category: predicate.special_category,
            geographic: predicate.geographic.clone(),
            city_patterns: predicate
                .city_substrings
                .iter()
                .map(|s| contains_pattern(s))
                .collect(),
        }
    }
}

/// Number of placeholders [`scope_sql`] consumes.
pub const SCOPE_PARAMS: usize = 5;

/// Region AND city filter over the `call_targets` row aliased `t`,
/// numbering placeholders from `$first`.
///
/// Reserved targets pass the special-category and geographic branches only
/// when reserved for one of the resolved virtual callers.
pub fn scope_sql(t: &str, first: usize) -> String {
    let region_on = first;
    let ids = first + 1;
    let special = first + 2;
    let regions = first + 3;
    let cities = first + 4;
    let unreserved =
        format!("({t}.preferred_caller_id IS NULL OR {t}.preferred_caller_id = ANY(${ids}::bigint[]))");

    format!(
        "(NOT ${region_on}::bool
            OR {t}.preferred_caller_id = ANY(${ids}::bigint[])
            OR (${special}::bool AND {t}.wants_special_category AND {unreserved})
            OR ({t}.region = ANY(${regions}::text[]) AND {unreserved}))
         AND (cardinality(${cities}::text[]) = 0
            OR EXISTS (SELECT 1 FROM unnest({t}.cities) AS city
                       WHERE city LIKE ANY(${cities}::text[])))"
    )
}

/// `LIKE` pattern matching `needle` anywhere, case-sensitively.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Append the [`ScopeBinds`] to a query, in placeholder order.
macro_rules! bind_scope {
    ($query:expr, $binds:expr) => {
        $query
            .bind($binds.region_filter)
            .bind($binds.virtual_caller_ids.as_slice())
            .bind($binds.special_category)
            .bind($binds.geographic.as_slice())
            .bind($binds.city_patterns.as_slice())
    };
}

pub(crate) use bind_scope;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wraps_and_escapes() {
        assert_eq!(contains_pattern("Bankya"), "%Bankya%");
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn sql_numbers_placeholders_from_offset() {
        let sql = scope_sql("t", 3);
        for n in 3..3 + SCOPE_PARAMS {
            assert!(sql.contains(&format!("${n}::")), "missing ${n}");
        }
        assert!(!sql.contains("$2::"));
        assert!(!sql.contains("$8::"));
    }

    #[test]
    fn binds_follow_predicate() {
        let predicate = EligibilityPredicate {
            geographic: vec!["Sofia".into()],
            virtual_caller_ids: vec![4],
            special_category: true,
            city_substrings: vec!["Bank".into()],
        };
        let binds = ScopeBinds::from(&predicate);
        assert!(binds.region_filter);
        assert_eq!(binds.virtual_caller_ids, vec![4]);
        assert_eq!(binds.city_patterns, vec!["%Bank%"]);

        let open = ScopeBinds::from(&EligibilityPredicate::default());
        assert!(!open.region_filter);
        assert!(open.city_patterns.is_empty());
    }
}
