//! Best-guess data structure inference from lexical signals.
//!
//! Each structure kind has its own independent substring test, so several
//! kinds can fire for one snippet. Only arrays try to recover real values
//! (from a numeric initializer list); every other kind gets a fixed sample
//! payload because its contents cannot be recovered from surface text.
//!
//! An empty [`DataStructureSet`] means no signal was found. It does not mean
//! the source is free of data structures.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// Longest array sample kept from a literal initializer.
pub const MAX_ARRAY_SAMPLE: usize = 6;

pub const DEFAULT_ARRAY: [i64; 5] = [64, 34, 25, 12, 22];
pub const DEFAULT_LINKED_LIST: [i64; 4] = [10, 20, 30, 40];
pub const DEFAULT_STACK: [i64; 5] = [1, 2, 3, 4, 5];
pub const DEFAULT_QUEUE: [&str; 4] = ["A", "B", "C", "D"];
pub const DEFAULT_TREE: [i64; 7] = [1, 2, 3, 4, 5, 6, 7];
pub const DEFAULT_HASH_TABLE: [(&str, &str); 3] =
    [("key1", "val1"), ("key2", "val2"), ("key3", "val3")];

lazy_static! {
    /// Innermost `{1, 2, 3}` initializers (C, C++, Java). Innermost so an
    /// enclosing function body does not swallow the literal.
    static ref BRACE_GROUP: Regex = Regex::new(r"\{([^{}]+)\}").unwrap();
    /// Innermost `[1, 2, 3]` literals (Python, Go, Rust macros).
    static ref BRACKET_GROUP: Regex = Regex::new(r"\[([^\[\]]+)\]").unwrap();
}

/// Kind of textbook data structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    Array,
    LinkedList,
    Stack,
    Queue,
    BinaryTree,
    HashTable,
}

impl StructureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureKind::Array => "array",
            StructureKind::LinkedList => "linked_list",
            StructureKind::Stack => "stack",
            StructureKind::Queue => "queue",
            StructureKind::BinaryTree => "binary_tree",
            StructureKind::HashTable => "hash_table",
        }
    }

    /// Title used on diagrams and in reports.
    pub fn title(&self) -> &'static str {
        match self {
            StructureKind::Array => "Array",
            StructureKind::LinkedList => "Linked List",
            StructureKind::Stack => "Stack",
            StructureKind::Queue => "Queue",
            StructureKind::BinaryTree => "Binary Tree",
            StructureKind::HashTable => "Hash Table",
        }
    }
}

impl std::fmt::Display for StructureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Representative values for one structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SamplePayload {
    Integers(Vec<i64>),
    Labels(Vec<String>),
    /// Complete binary tree in level order; children of `i` are `2i+1`, `2i+2`.
    LevelOrder(Vec<i64>),
    Mapping(Vec<(String, String)>),
}

impl SamplePayload {
    pub fn len(&self) -> usize {
        match self {
            SamplePayload::Integers(v) | SamplePayload::LevelOrder(v) => v.len(),
            SamplePayload::Labels(v) => v.len(),
            SamplePayload::Mapping(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values rendered as display strings, in order.
    pub fn labels(&self) -> Vec<String> {
        match self {
            SamplePayload::Integers(v) | SamplePayload::LevelOrder(v) => {
                v.iter().map(|n| n.to_string()).collect()
            }
            SamplePayload::Labels(v) => v.clone(),
            SamplePayload::Mapping(v) => v.iter().map(|(k, val)| format!("{}: {}", k, val)).collect(),
        }
    }
}

/// A detected structure with its sample payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedStructure {
    pub kind: StructureKind,
    pub sample: SamplePayload,
}

/// Detected structures in detection order. Each kind appears at most once
/// and every payload is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DataStructureSet {
    entries: Vec<DetectedStructure>,
}

impl DataStructureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a structure. Replaces an earlier payload of the same kind in place
    /// and ignores empty payloads.
    pub fn insert(&mut self, kind: StructureKind, sample: SamplePayload) {
        if sample.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|e| e.kind == kind) {
            Some(existing) => existing.sample = sample,
            None => self.entries.push(DetectedStructure { kind, sample }),
        }
    }

    pub fn get(&self, kind: StructureKind) -> Option<&SamplePayload> {
        self.entries.iter().find(|e| e.kind == kind).map(|e| &e.sample)
    }

    pub fn contains(&self, kind: StructureKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn kinds(&self) -> Vec<StructureKind> {
        self.entries.iter().map(|e| e.kind).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetectedStructure> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scan `text` for data structure signals.
pub fn infer(text: &str) -> DataStructureSet {
    let lower = text.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));
    let mut set = DataStructureSet::new();

    if text.contains('[') || lower.contains("array") {
        let sample = literal_array(text).unwrap_or_else(|| DEFAULT_ARRAY.to_vec());
        set.insert(StructureKind::Array, SamplePayload::Integers(sample));
    }

    if has_any(&["node", "next", "linkedlist"]) {
        set.insert(
            StructureKind::LinkedList,
            SamplePayload::Integers(DEFAULT_LINKED_LIST.to_vec()),
        );
    }

    if has_any(&["stack", "push", "pop"]) {
        set.insert(StructureKind::Stack, SamplePayload::Integers(DEFAULT_STACK.to_vec()));
    }

    if has_any(&["queue", "enqueue", "dequeue"]) {
        set.insert(
            StructureKind::Queue,
            SamplePayload::Labels(DEFAULT_QUEUE.iter().map(|s| s.to_string()).collect()),
        );
    }

    if has_any(&["tree", "binary", "root"]) {
        set.insert(StructureKind::BinaryTree, SamplePayload::LevelOrder(DEFAULT_TREE.to_vec()));
    }

    if has_any(&["map", "hash", "dict", "hashmap"]) {
        set.insert(
            StructureKind::HashTable,
            SamplePayload::Mapping(
                DEFAULT_HASH_TABLE
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        );
    }

    debug!(kinds = ?set.kinds(), "inferred data structures");
    set
}

/// Why a candidate group could not be used as a sample.
#[derive(Debug, PartialEq, Eq)]
enum SampleError {
    NoDigits,
    Malformed,
}

/// The first brace group, then the first bracket group, that holds at
/// least one all-digit comma-separated token.
fn literal_array(text: &str) -> Option<Vec<i64>> {
    BRACE_GROUP
        .captures_iter(text)
        .chain(BRACKET_GROUP.captures_iter(text))
        .filter_map(|caps| caps.get(1))
        .find_map(|group| match integer_tokens(group.as_str()) {
            Ok(values) => Some(values),
            Err(SampleError::Malformed) => {
                debug!(group = group.as_str(), "skipping malformed array literal");
                None
            }
            Err(SampleError::NoDigits) => None,
        })
}

/// Keep the all-digit tokens of a comma-separated list, capped at
/// [`MAX_ARRAY_SAMPLE`]. Other tokens are skipped.
fn integer_tokens(group: &str) -> Result<Vec<i64>, SampleError> {
    let mut values = Vec::new();
    for token in group.split(',').map(str::trim) {
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        let value = token.parse::<i64>().map_err(|_| SampleError::Malformed)?;
        values.push(value);
    }
    if values.is_empty() {
        return Err(SampleError::NoDigits);
    }
    values.truncate(MAX_ARRAY_SAMPLE);
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_literal_truncated_to_six() {
        let set = infer("int arr[] = {64, 34, 25, 12, 22, 11, 90};");
        assert_eq!(
            set.get(StructureKind::Array),
            Some(&SamplePayload::Integers(vec![64, 34, 25, 12, 22, 11]))
        );
    }

    #[test]
    fn test_literal_inside_function_body() {
        let set = infer("int main() {\n    int arr[] = {5, 4, 3};\n    return 0;\n}\n");
        assert_eq!(
            set.get(StructureKind::Array),
            Some(&SamplePayload::Integers(vec![5, 4, 3]))
        );
    }

    #[test]
    fn test_array_from_bracket_literal() {
        let set = infer("xs = [3, 1, 2]");
        assert_eq!(
            set.get(StructureKind::Array),
            Some(&SamplePayload::Integers(vec![3, 1, 2]))
        );
    }

    #[test]
    fn test_array_default_when_no_literal() {
        let set = infer("arr[i] = arr[j];");
        assert_eq!(
            set.get(StructureKind::Array),
            Some(&SamplePayload::Integers(DEFAULT_ARRAY.to_vec()))
        );
    }

    #[test]
    fn test_array_keyword_triggers_without_brackets() {
        let set = infer("ArrayList<Integer> xs");
        assert!(set.contains(StructureKind::Array));
    }

    #[test]
    fn test_malformed_group_is_skipped() {
        // The first group overflows i64; the second one is used.
        let set = infer("int a[] = {99999999999999999999999, 1}; int b[] = {7, 8};");
        assert_eq!(
            set.get(StructureKind::Array),
            Some(&SamplePayload::Integers(vec![7, 8]))
        );
    }

    #[test]
    fn test_non_digit_tokens_are_skipped() {
        let set = infer("int v[] = {1, x, 2};");
        assert_eq!(
            set.get(StructureKind::Array),
            Some(&SamplePayload::Integers(vec![1, 2]))
        );
    }

    #[test]
    fn test_stack_detection() {
        let set = infer("s.push(1); s.pop();");
        assert_eq!(
            set.get(StructureKind::Stack),
            Some(&SamplePayload::Integers(vec![1, 2, 3, 4, 5]))
        );

        let set = infer("x = y + z;");
        assert!(!set.contains(StructureKind::Stack));
    }

    #[test]
    fn test_multiple_kinds_keep_detection_order() {
        let set = infer("struct Node { Node* next; }; HashMap root; queue q; stack s;");
        assert_eq!(
            set.kinds(),
            vec![
                StructureKind::LinkedList,
                StructureKind::Stack,
                StructureKind::Queue,
                StructureKind::BinaryTree,
                StructureKind::HashTable,
            ]
        );
    }

    #[test]
    fn test_tree_sample_is_level_order() {
        let set = infer("TreeNode* root;");
        assert_eq!(
            set.get(StructureKind::BinaryTree),
            Some(&SamplePayload::LevelOrder(vec![1, 2, 3, 4, 5, 6, 7]))
        );
    }

    #[test]
    fn test_hash_table_sample() {
        let set = infer("d = dict()");
        let sample = set.get(StructureKind::HashTable).unwrap();
        assert_eq!(sample.labels(), vec!["key1: val1", "key2: val2", "key3: val3"]);
    }

    #[test]
    fn test_no_signal_is_empty() {
        assert!(infer("").is_empty());
        assert!(infer("x = y + z").is_empty());
    }

    #[test]
    fn test_payloads_never_empty() {
        let set = infer("array node stack queue tree map [] {}");
        assert_eq!(set.len(), 6);
        assert!(set.iter().all(|e| !e.sample.is_empty()));
    }
}
