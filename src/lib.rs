pub mod sequence;
pub mod c_sequence;
pub use sequence::sequence as other_sequence;
pub use c_sequence::c_sequence as other_c_sequence;
pub use other_sequence::{Sequence, SequenceError};
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let mut sequence: Sequence<u32> = Sequence::default();
        sequence.extend([1, 2, 3]);
        assert_eq!(sequence.to_string(), "[1, 2, 3]");
        assert_eq!(sequence.insert_after(&9, 4), Err(SequenceError::NotFound));
    }
}
