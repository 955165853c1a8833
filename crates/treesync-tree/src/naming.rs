//! Canonical `NN_name` naming and rename planning.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;
use treesync_common_config::NamingConfig;
use treesync_common_core::{Error, ProjectNode, RenameEntry, RenamePlan, Result};

fn nn_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)^([0-9]{2})(.+)$").expect("valid prefix pattern"))
}

/// Split a directory name into its two-digit prefix and its suffix.
///
/// One separator (`_`, `-` or `separator`) right after the digits belongs to
/// neither part, unless it is all that follows them: `01_` has suffix `_`.
pub fn split_prefix(name: &str, separator: char) -> (Option<u8>, &str) {
    let Some(caps) = nn_pattern().captures(name) else {
        return (None, name);
    };
    let (digits, rest) = (&caps[1], caps.get(2).map_or("", |m| m.as_str()));

    let suffix = match rest.strip_prefix(|c: char| c == '_' || c == '-' || c == separator) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => rest,
    };

    match digits.parse::<u8>() {
        Ok(prefix) => (Some(prefix), suffix),
        Err(_) => (None, name),
    }
}

/// Decides whether a scan is canonical and plans the renames that make it so.
#[derive(Debug, Clone, Copy)]
pub struct NamingNormalizer {
    origin: u8,
    separator: char,
}

impl Default for NamingNormalizer {
    fn default() -> Self {
        Self::new(&NamingConfig::default())
    }
}

impl NamingNormalizer {
    pub fn new(config: &NamingConfig) -> Self {
        Self {
            origin: config.prefix_origin,
            separator: config.separator,
        }
    }

    /// How many siblings can be numbered.
    pub fn capacity(&self) -> usize {
        100 - usize::from(self.origin)
    }

    /// Prefix expected at zero-based `position`.
    fn expected_prefix(&self, position: usize) -> usize {
        usize::from(self.origin) + position
    }

    /// Parse a scanned name into a node under `root`.
    pub fn parse(&self, root: &Path, name: &str) -> ProjectNode {
        let (prefix, suffix) = split_prefix(name, self.separator);
        ProjectNode {
            name: name.to_string(),
            prefix,
            suffix: suffix.to_string(),
            path: root.join(name),
        }
    }

    /// Build target name for a directory name.
    pub fn target_name<'a>(&self, name: &'a str) -> &'a str {
        split_prefix(name, self.separator).1
    }

    /// Canonical name for the node at zero-based `position`.
    ///
    /// A prefixed name only has its digits replaced, so `05-foo` and `03foo`
    /// keep their separator (or lack of one). An unprefixed name gets the
    /// configured separator between the new digits and the name.
    pub fn canonical_name(&self, position: usize, node: &ProjectNode) -> String {
        let prefix = self.expected_prefix(position);
        match node.prefix {
            // The pattern guarantees two ASCII digits at the start.
            Some(_) => format!("{prefix:02}{}", &node.name[2..]),
            None => format!("{prefix:02}{}{}", self.separator, node.name),
        }
    }

    /// True when every name carries the prefix of its position.
    pub fn is_canonical<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().enumerate().all(|(i, name)| {
            let (prefix, _) = split_prefix(name.as_ref(), self.separator);
            prefix.map(usize::from) == Some(self.expected_prefix(i))
        })
    }

    /// Fail when two names share a suffix (and therefore a build target).
    pub fn check_collisions(&self, nodes: &[ProjectNode]) -> Result<()> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for node in nodes {
            if let Some(first) = seen.insert(node.suffix.as_str(), node.name.as_str()) {
                return Err(Error::Collision {
                    first: first.to_string(),
                    second: node.name.clone(),
                    suffix: node.suffix.clone(),
                });
            }
        }
        Ok(())
    }

    /// Compute the rename plan for `names` (in scan order).
    ///
    /// Nothing is touched on disk; every rejection happens here so that a bad
    /// plan never reaches the renamer.
    pub fn plan<S: AsRef<str>>(&self, root: &Path, names: &[S]) -> Result<RenamePlan> {
        if names.len() > self.capacity() {
            return Err(Error::OutOfRange {
                count: names.len(),
                capacity: self.capacity(),
            });
        }

        let nodes: Vec<ProjectNode> = names.iter().map(|n| self.parse(root, n.as_ref())).collect();
        self.check_collisions(&nodes)?;

        if self.is_canonical(names) {
            debug!(count = nodes.len(), "already canonical");
            return Ok(RenamePlan::identity(names));
        }

        let entries: Vec<RenameEntry> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let new_name = if node.prefix.map(usize::from) == Some(self.expected_prefix(i)) {
                    node.name.clone()
                } else {
                    self.canonical_name(i, node)
                };
                RenameEntry::new(node.name.clone(), new_name)
            })
            .collect();

        let mut targets = HashSet::new();
        for entry in &entries {
            if !targets.insert(entry.new_name.as_str()) {
                return Err(Error::Collision {
                    first: entry.old_name.clone(),
                    second: entry.new_name.clone(),
                    suffix: self.target_name(&entry.new_name).to_string(),
                });
            }
        }

        Ok(RenamePlan::new(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn root() -> PathBuf {
        PathBuf::from("/work/lessons")
    }

    fn names(plan: &RenamePlan) -> Vec<(&str, &str)> {
        plan.entries()
            .iter()
            .map(|e| (e.old_name.as_str(), e.new_name.as_str()))
            .collect()
    }

    #[test]
    fn test_split_prefix() {
        assert_eq!(split_prefix("01_a_proj", '_'), (Some(1), "a_proj"));
        assert_eq!(split_prefix("02-oop", '_'), (Some(2), "oop"));
        assert_eq!(split_prefix("03foo", '_'), (Some(3), "foo"));
        assert_eq!(split_prefix("123abc", '_'), (Some(12), "3abc"));
        assert_eq!(split_prefix("b_proj", '_'), (None, "b_proj"));
        assert_eq!(split_prefix("7", '_'), (None, "7"));
        assert_eq!(split_prefix("01", '_'), (None, "01"));
        assert_eq!(split_prefix("01_", '_'), (Some(1), "_"));
        assert_eq!(split_prefix("01-", '_'), (Some(1), "-"));
        assert_eq!(split_prefix("01__", '_'), (Some(1), "_"));
        assert_eq!(split_prefix("05.x", '.'), (Some(5), "x"));
    }

    #[test]
    fn test_parse_node() {
        let node = NamingNormalizer::default().parse(&root(), "02_b_proj");
        assert_eq!(node.prefix, Some(2));
        assert_eq!(node.suffix, "b_proj");
        assert_eq!(node.target_name(), "b_proj");
        assert_eq!(node.path, PathBuf::from("/work/lessons/02_b_proj"));
    }

    #[test]
    fn test_is_canonical() {
        let n = NamingNormalizer::default();
        assert!(n.is_canonical(&["01_a", "02_b", "03c"]));
        assert!(n.is_canonical::<&str>(&[]));
        assert!(!n.is_canonical(&["01_a", "03_b"]));
        assert!(!n.is_canonical(&["00_a", "01_b"]));
        assert!(!n.is_canonical(&["01_a", "b"]));

        let zero = NamingNormalizer::new(&NamingConfig {
            prefix_origin: 0,
            ..NamingConfig::default()
        });
        assert!(zero.is_canonical(&["00_a", "01_b"]));
        assert!(!zero.is_canonical(&["01_a", "02_b"]));
    }

    #[test]
    fn test_end_to_end_plan() {
        let plan = NamingNormalizer::default()
            .plan(&root(), &["01_a_proj", "b_proj", "third"])
            .unwrap();

        assert_eq!(
            names(&plan),
            vec![
                ("01_a_proj", "01_a_proj"),
                ("b_proj", "02_b_proj"),
                ("third", "03_third"),
            ]
        );
    }

    #[test]
    fn test_canonical_input_gives_identity_plan() {
        let plan = NamingNormalizer::default()
            .plan(&root(), &["01_a", "02-b", "03c"])
            .unwrap();
        assert!(plan.is_identity());
    }

    #[test]
    fn test_renumbering_uses_scan_order_not_old_prefixes() {
        let plan = NamingNormalizer::default()
            .plan(&root(), &["02_x", "03_y", "05_z", "a"])
            .unwrap();
        assert_eq!(
            names(&plan),
            vec![
                ("02_x", "01_x"),
                ("03_y", "02_y"),
                ("05_z", "03_z"),
                ("a", "04_a"),
            ]
        );
    }

    #[test]
    fn test_renumbering_keeps_existing_separator() {
        let plan = NamingNormalizer::default()
            .plan(&root(), &["03foo", "05-bar", "baz"])
            .unwrap();
        assert_eq!(
            names(&plan),
            vec![("03foo", "01foo"), ("05-bar", "02-bar"), ("baz", "03_baz")]
        );

        let dotted = NamingNormalizer::new(&NamingConfig {
            separator: '.',
            ..NamingConfig::default()
        });
        let plan = dotted.plan(&root(), &["04_a", "b"]).unwrap();
        assert_eq!(names(&plan), vec![("04_a", "01_a"), ("b", "02.b")]);
    }

    #[test]
    fn test_separator_only_suffix_is_canonical() {
        let n = NamingNormalizer::default();
        let scan = ["01_", "02_b"];
        assert!(n.is_canonical(&scan));
        assert!(n.plan(&root(), &scan).unwrap().is_identity());

        let node = n.parse(&root(), "01-");
        assert_eq!(node.prefix, Some(1));
        assert_eq!(node.target_name(), "-");

        let plan = n.plan(&root(), &["00_", "a"]).unwrap();
        assert_eq!(names(&plan), vec![("00_", "01_"), ("a", "02_a")]);
    }

    #[test]
    fn test_zero_origin_plan() {
        let n = NamingNormalizer::new(&NamingConfig {
            prefix_origin: 0,
            ..NamingConfig::default()
        });
        let plan = n.plan(&root(), &["01_ints", "02_floats"]).unwrap();
        assert_eq!(
            names(&plan),
            vec![("01_ints", "00_ints"), ("02_floats", "01_floats")]
        );
    }

    #[test]
    fn test_collision() {
        let err = NamingNormalizer::default()
            .plan(&root(), &["01_foo", "02_foo"])
            .unwrap_err();
        match err {
            Error::Collision { first, second, suffix } => {
                assert_eq!(first, "01_foo");
                assert_eq!(second, "02_foo");
                assert_eq!(suffix, "foo");
            }
            other => panic!("Expected Collision, got {other:?}"),
        }

        assert!(matches!(
            NamingNormalizer::default().plan(&root(), &["01foo", "foo"]),
            Err(Error::Collision { .. })
        ));
    }

    #[test]
    fn test_range_boundary() {
        let n = NamingNormalizer::default();
        let ninety_nine: Vec<String> = (0..99).map(|i| format!("p{i:03}")).collect();
        let plan = n.plan(&root(), &ninety_nine).unwrap();
        assert_eq!(plan.entries()[98].new_name, "99_p098");

        let hundred: Vec<String> = (0..100).map(|i| format!("p{i:03}")).collect();
        match n.plan(&root(), &hundred).unwrap_err() {
            Error::OutOfRange { count, capacity } => {
                assert_eq!(count, 100);
                assert_eq!(capacity, 99);
            }
            other => panic!("Expected OutOfRange, got {other:?}"),
        }

        let zero = NamingNormalizer::new(&NamingConfig {
            prefix_origin: 0,
            ..NamingConfig::default()
        });
        assert_eq!(zero.plan(&root(), &hundred).unwrap().entries()[99].new_name, "99_p099");
    }

    proptest! {
        #[test]
        fn prop_prefixes_follow_scan_order(
            set in prop::collection::btree_set("[0-9]{0,2}[a-z_]{1,6}", 0..40)
        ) {
            let scan: Vec<String> = set.into_iter().collect();
            let n = NamingNormalizer::default();
            let nodes: Vec<ProjectNode> = scan.iter().map(|s| n.parse(&root(), s)).collect();
            prop_assume!(n.check_collisions(&nodes).is_ok());

            let plan = n.plan(&root(), &scan).unwrap();
            for (i, entry) in plan.entries().iter().enumerate() {
                // Order and suffix preservation
                prop_assert_eq!(&entry.old_name, &scan[i]);
                let (prefix, suffix) = split_prefix(&entry.new_name, '_');
                prop_assert_eq!(prefix.map(usize::from), Some(i + 1));
                prop_assert_eq!(suffix, nodes[i].suffix.as_str());
            }

            // Applying the plan yields a canonical, sorted tree.
            let renamed = plan.final_names();
            prop_assert!(n.is_canonical(&renamed));
            let mut sorted = renamed.clone();
            sorted.sort();
            prop_assert_eq!(&sorted, &renamed);
            prop_assert!(n.plan(&root(), &renamed).unwrap().is_identity());
        }
    }
}
