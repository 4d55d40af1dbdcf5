mod node;

use super::BinaryDictionary;

/// Hand-laid latest-format blob, bigrams disabled, holding only "cat" (200).
pub(super) static CAT_BLOB: [u8; 17] = [
    201, 0, // header
    1, b'c', 0x40, 0x00, 0x07, // root: 'c' -> list at 7
    1, b'a', 0x40, 0x00, 0x0C, // 'a' -> list at 12
    1, b't', 0x80, 200, 0x00, // 't' terminal, freq 200, empty bigram suffix
];

pub(super) fn cat_dict() -> BinaryDictionary {
    BinaryDictionary::from_static(&CAT_BLOB).unwrap()
}
