//! Sanity check for externally supplied boards.

use crate::error::ValidationError;
use crate::tube::{Color, Slot};

/// Check that a flattened slot list describes a well-formed board with
/// `num_slots` slots per tube.
///
/// The empty slots must fill a whole, non-zero number of tubes, and every
/// color must occupy exactly `num_slots` slots. Returns the number of extra
/// (empty) tubes.
pub fn validate(slots: &[Slot], num_slots: usize) -> Result<usize, ValidationError> {
    if slots.is_empty() || num_slots == 0 {
        return Err(ValidationError::NoSlots);
    }

    let mut sorted = slots.to_vec();
    sorted.sort_unstable();

    let empties = sorted.iter().take_while(|slot| slot.is_none()).count();
    if empties == 0 {
        return Err(ValidationError::NoEmptySlots);
    }
    if empties % num_slots != 0 {
        return Err(ValidationError::EmptiesNotMultiple { empties, num_slots });
    }

    let colors: Vec<Color> = sorted.into_iter().flatten().collect();
    for run in colors.chunk_by(|a, b| a == b) {
        if run.len() != num_slots {
            return Err(ValidationError::ColorCount {
                color: run[0],
                expected: num_slots,
                found: run.len(),
            });
        }
    }

    Ok(empties / num_slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(values: &[i32]) -> Vec<Slot> {
        values
            .iter()
            .map(|&v| (v >= 0).then_some(Color(v as u32)))
            .collect()
    }

    #[test]
    fn test_valid_board() {
        let board = slots(&[0, 1, 1, 0, -1, -1]);
        assert_eq!(validate(&board, 2), Ok(1));

        let board = slots(&[3, 7, 7, 3, 3, 7, -1, -1, -1, -1, -1, -1]);
        assert_eq!(validate(&board, 3), Ok(2));
    }

    #[test]
    fn test_board_of_only_empty_tubes() {
        assert_eq!(validate(&slots(&[-1, -1, -1, -1]), 2), Ok(2));
    }

    #[test]
    fn test_no_empty_slots() {
        assert_eq!(
            validate(&slots(&[0, 0, 1, 1]), 2),
            Err(ValidationError::NoEmptySlots)
        );
    }

    #[test]
    fn test_empties_not_multiple() {
        assert_eq!(
            validate(&slots(&[0, 0, 0, -1, 1, 1]), 3),
            Err(ValidationError::EmptiesNotMultiple {
                empties: 1,
                num_slots: 3
            })
        );
    }

    #[test]
    fn test_color_with_too_few_units() {
        assert_eq!(
            validate(&slots(&[0, 1, 1, 0, 1, -1, -1, -1]), 3),
            Err(ValidationError::ColorCount {
                color: Color(0),
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_last_color_is_checked() {
        assert_eq!(
            validate(&slots(&[0, 9, 0, -1, -1, -1, -1]), 2),
            Err(ValidationError::ColorCount {
                color: Color(9),
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            validate(&slots(&[0, 0, 5, 5, 5, -1, -1]), 2),
            Err(ValidationError::ColorCount {
                color: Color(5),
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_no_slots() {
        assert_eq!(validate(&[], 4), Err(ValidationError::NoSlots));
    }
}
