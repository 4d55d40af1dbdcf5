//! Test fixtures: lays out small dictionary blobs in the on-disk format.
//!
//! Child lists are written depth-first in sibling order, so child addresses
//! are non-decreasing across every sibling list (the layout the reverse
//! bigram lookup depends on). Panics on inputs the format cannot hold; this
//! is fixture code, not a dictionary compiler.

use std::collections::{BTreeMap, HashMap};

use crate::dict::{BinaryDictionary, DICTIONARY_HEADER_SIZE, DICTIONARY_VERSION_MIN};

const MAX_ADDRESS: usize = (1 << 22) - 1;

pub fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// One key position per character, each with only its primary code.
pub fn typed(s: &str) -> Vec<Vec<u16>> {
    s.encode_utf16().map(|c| vec![c]).collect()
}

#[derive(Default)]
struct TrieNode {
    children: BTreeMap<u16, TrieNode>,
    frequency: Option<u8>,
    bigrams: Vec<(Vec<u16>, u8)>,
}

#[derive(Clone, Copy, Default)]
struct Placement {
    entry: usize,
    children: usize,
}

pub struct DictBuilder {
    version: u8,
    bigram_flag: u8,
    root: TrieNode,
}

impl Default for DictBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DictBuilder {
    /// Latest format with bigrams enabled.
    pub fn new() -> Self {
        Self {
            version: 201,
            bigram_flag: 1,
            root: TrieNode::default(),
        }
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn bigram_flag(mut self, flag: u8) -> Self {
        self.bigram_flag = flag;
        self
    }

    pub fn word(mut self, word: &str, frequency: u8) -> Self {
        let node = self.node_mut(&utf16(word));
        node.frequency = Some(frequency);
        self
    }

    pub fn bigram(mut self, from: &str, to: &str, frequency: u8) -> Self {
        assert!(frequency <= 0x7F, "bigram frequency is 7 bits");
        let node = self.node_mut(&utf16(from));
        node.bigrams.push((utf16(to), frequency));
        self
    }

    fn node_mut(&mut self, word: &[u16]) -> &mut TrieNode {
        let mut node = &mut self.root;
        for &c in word {
            node = node.children.entry(c).or_default();
        }
        node
    }

    fn is_latest(&self) -> bool {
        self.version >= DICTIONARY_VERSION_MIN && self.bigram_flag <= 1
    }

    fn root_offset(&self) -> usize {
        if self.is_latest() {
            DICTIONARY_HEADER_SIZE
        } else {
            0
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let latest = self.is_latest();
        let mut places = HashMap::new();
        let mut path = Vec::new();
        let end = layout(
            &self.root,
            self.root_offset(),
            latest,
            &mut path,
            &mut places,
        );

        let mut out = Vec::with_capacity(end);
        if latest {
            out.push(self.version);
            out.push(self.bigram_flag);
        }
        write_list(&self.root, latest, &mut path, &places, &mut out);
        assert_eq!(out.len(), end, "layout and serialization disagree");
        out
    }

    pub fn build_dict(&self) -> BinaryDictionary {
        BinaryDictionary::from_bytes(self.build()).expect("fixture blob is non-empty")
    }

    /// Entry offset of `word`'s last character, i.e. its bigram address.
    pub fn entry_offset(&self, word: &str) -> Option<usize> {
        let mut places = HashMap::new();
        let mut path = Vec::new();
        layout(
            &self.root,
            self.root_offset(),
            self.is_latest(),
            &mut path,
            &mut places,
        );
        places.get(&utf16(word)).map(|p| p.entry)
    }
}

fn char_size(c: u16) -> usize {
    if c >= 0xFF {
        3
    } else {
        1
    }
}

fn entry_size(c: u16, node: &TrieNode, latest: bool) -> usize {
    let mut size = char_size(c);
    size += if node.children.is_empty() { 1 } else { 3 };
    if node.frequency.is_some() {
        size += 1;
        if latest {
            size += if node.bigrams.is_empty() {
                1
            } else {
                4 * node.bigrams.len()
            };
        }
    }
    size
}

fn layout(
    node: &TrieNode,
    offset: usize,
    latest: bool,
    path: &mut Vec<u16>,
    places: &mut HashMap<Vec<u16>, Placement>,
) -> usize {
    assert!(node.children.len() <= 0xFF, "sibling count is one byte");
    let mut pos = offset + 1;
    for (&c, child) in &node.children {
        path.push(c);
        places.entry(path.clone()).or_default().entry = pos;
        pos += entry_size(c, child, latest);
        path.pop();
    }
    let mut next = pos;
    for (&c, child) in &node.children {
        if child.children.is_empty() {
            continue;
        }
        path.push(c);
        assert!(next <= MAX_ADDRESS, "child address exceeds 22 bits");
        places.entry(path.clone()).or_default().children = next;
        next = layout(child, next, latest, path, places);
        path.pop();
    }
    next
}

fn write_list(
    node: &TrieNode,
    latest: bool,
    path: &mut Vec<u16>,
    places: &HashMap<Vec<u16>, Placement>,
    out: &mut Vec<u8>,
) {
    out.push(node.children.len() as u8);
    for (&c, child) in &node.children {
        path.push(c);
        let place = places[path.as_slice()];
        debug_assert_eq!(out.len(), place.entry);
        if c >= 0xFF {
            out.push(0xFF);
            out.extend_from_slice(&c.to_be_bytes());
        } else {
            out.push(c as u8);
        }
        let mut flags = 0u8;
        if child.frequency.is_some() {
            flags |= 0x80;
        }
        if child.children.is_empty() {
            out.push(flags);
        } else {
            let a = place.children;
            out.push(flags | 0x40 | ((a >> 16) as u8 & 0x3F));
            out.push((a >> 8) as u8);
            out.push(a as u8);
        }
        if let Some(freq) = child.frequency {
            out.push(freq);
            if latest {
                write_bigrams(&child.bigrams, places, out);
            }
        }
        path.pop();
    }
    for (&c, child) in &node.children {
        if child.children.is_empty() {
            continue;
        }
        path.push(c);
        write_list(child, latest, path, places, out);
        path.pop();
    }
}

fn write_bigrams(
    bigrams: &[(Vec<u16>, u8)],
    places: &HashMap<Vec<u16>, Placement>,
    out: &mut Vec<u8>,
) {
    if bigrams.is_empty() {
        out.push(0);
        return;
    }
    for (i, (target, freq)) in bigrams.iter().enumerate() {
        let a = places
            .get(target)
            .map(|p| p.entry)
            .expect("bigram target must be a dictionary word");
        out.push(0x80 | ((a >> 16) as u8 & 0x3F));
        out.push((a >> 8) as u8);
        out.push(a as u8);
        let more = if i + 1 < bigrams.len() { 0x80 } else { 0 };
        out.push(more | freq);
    }
}

/// Small English dictionary shared across tests.
///
/// Frequencies are chosen so ranking ties and near-ties are exercised.
pub fn sample_builder() -> DictBuilder {
    DictBuilder::new()
        .word("a", 200)
        .word("an", 180)
        .word("and", 250)
        .word("ant", 90)
        .word("apple", 120)
        .word("apply", 60)
        .word("cat", 200)
        .word("cats", 110)
        .word("car", 150)
        .word("care", 100)
        .word("can't", 80)
        .word("cant", 40)
        .word("dog", 160)
        .word("the", 255)
        .word("then", 130)
        .word("there", 140)
        .word("they", 150)
        .word("The", 70)
        .bigram("an", "apple", 50)
        .bigram("an", "ant", 20)
        .bigram("the", "cat", 90)
        .bigram("the", "dog", 70)
        .bigram("the", "car", 90)
}

pub fn sample_dict() -> BinaryDictionary {
    sample_builder().build_dict()
}
