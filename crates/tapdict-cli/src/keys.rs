//! Command-line notation for typed key positions.
//!
//! Each argument is one position; its characters are the alternates for that
//! key, typed letter first. `"th" "ge"` types `t` then `g`, with `h` and `e`
//! as the neighboring-key alternates.

use tapdict_core::predictor::KeyPresses;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("no key positions given")]
    Empty,
    #[error("key position {0} is empty")]
    EmptyPosition(usize),
}

pub fn parse_keys<S: AsRef<str>>(args: &[S]) -> Result<KeyPresses, KeyError> {
    if args.is_empty() {
        return Err(KeyError::Empty);
    }
    let mut keys = KeyPresses::new();
    for (i, arg) in args.iter().enumerate() {
        let units: Vec<u16> = arg.as_ref().encode_utf16().collect();
        let Some((&primary, alternates)) = units.split_first() else {
            return Err(KeyError::EmptyPosition(i));
        };
        keys.push(primary, alternates);
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys_with_alternates() {
        let keys = parse_keys(&["th", "ge", "e"]).unwrap();
        assert_eq!(keys.len(), 3);
        assert_eq!(
            keys.positions().to_vec(),
            vec![
                vec![b't' as u16, b'h' as u16],
                vec![b'g' as u16, b'e' as u16],
                vec![b'e' as u16],
            ]
        );
    }

    #[test]
    fn test_parse_keys_errors() {
        assert_eq!(parse_keys::<&str>(&[]), Err(KeyError::Empty));
        assert_eq!(parse_keys(&["a", ""]), Err(KeyError::EmptyPosition(1)));
    }
}
