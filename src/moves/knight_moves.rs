use crate::game_state::chess_types::{square_delta, Square};

/// True when a knight on `from` reaches `to`. Blockers never matter.
#[inline]
pub const fn knight_reaches(from: Square, to: Square) -> bool {
    let (df, dr) = square_delta(from, to);
    (df * dr).abs() == 2
}

#[cfg(test)]
mod tests {
    use super::knight_reaches;

    #[test]
    fn knight_from_d4_has_eight_targets() {
        let d4 = 27u8;
        let targets = (0..64u8).filter(|&to| knight_reaches(d4, to)).count();
        assert_eq!(targets, 8);
    }

    #[test]
    fn knight_in_corner_has_two_targets() {
        let targets: Vec<u8> = (0..64u8).filter(|&to| knight_reaches(0, to)).collect();
        assert_eq!(targets, vec![10, 17]);
    }
}
