#[cfg(test)]
mod tests {
    use crate::{
        Category, Combination, CombinationError, ScoreBoard, ScoreBoardEntry, ScoreBoardError,
        SharedScoreBoard, UPPER_BONUS,
    };

    fn c(dice: [u8; 5]) -> Combination {
        Combination::new(dice).unwrap()
    }

    #[test]
    fn entry_score_is_computed_on_construction() {
        let hand = c([1, 1, 2, 5, 5]);
        assert_eq!(ScoreBoardEntry::new(hand, Category::Aces).score(), 2);
        assert_eq!(ScoreBoardEntry::new(hand, Category::Deuces).score(), 2);
        assert_eq!(ScoreBoardEntry::new(hand, Category::Threes).score(), 0);

        let e = ScoreBoardEntry::new(hand, Category::Fives);
        assert_eq!(e.category(), Category::Fives);
        assert_eq!(e.combination(), &hand);
        assert_eq!(e.score(), 10);
    }

    #[test]
    fn duplicate_category_is_rejected_and_board_unchanged() {
        let mut board = ScoreBoard::new();
        board.add(c([1, 1, 3, 5, 4]), Category::Aces).unwrap();
        let before = board.clone();

        let err = board.add(c([5, 5, 5, 5, 5]), Category::Aces).unwrap_err();
        assert_eq!(
            err,
            ScoreBoardError::DuplicateCategory {
                category: Category::Aces
            }
        );
        assert_eq!(board, before);
        assert_eq!(board.len(), 1);
        assert_eq!(board.get(Category::Aces).unwrap().score(), 2);
        assert_eq!(board.get(Category::Aces).unwrap().combination().dice(), [1, 1, 3, 5, 4]);
    }

    #[test]
    fn add_dice_validates_shape() {
        let mut board = ScoreBoard::new();
        let err = board.add_dice(&[1, 1, 1], Category::FullHouse).unwrap_err();
        assert_eq!(
            err,
            ScoreBoardError::Combination(CombinationError::Length { got: 3 })
        );
        let err = board.add_dice(&[1, 1, 1, 8, 2], Category::Choice).unwrap_err();
        assert!(matches!(
            err,
            ScoreBoardError::Combination(CombinationError::DieOutOfRange { index: 3, value: 8 })
        ));
        assert!(board.is_empty());

        let e = board.add_dice(&[1, 1, 1, 2, 2], Category::FullHouse).unwrap();
        assert_eq!(e.score(), 7);
    }

    #[test]
    fn score_aces_and_fours() {
        let mut board = ScoreBoard::new();
        board.add(c([1, 1, 3, 5, 4]), Category::Aces).unwrap();
        assert!(board.add(c([5, 5, 5, 5, 5]), Category::Aces).is_err());
        board.add(c([4, 4, 4, 4, 4]), Category::Fours).unwrap();

        assert_eq!(board.upper_section_bonus(), 0);
        assert_eq!(board.score(), 22);
    }

    #[test]
    fn score_with_upper_bonus() {
        let mut board = ScoreBoard::new();
        board.add(c([1, 4, 1, 2, 1]), Category::Deuces).unwrap();
        board.add(c([1, 4, 1, 2, 1]), Category::Aces).unwrap();
        assert!(board.add(c([1, 4, 1, 2, 5]), Category::Deuces).is_err());
        board.add(c([5, 5, 5, 5, 5]), Category::Fours).unwrap();
        board.add(c([6, 6, 6, 6, 6]), Category::Sixs).unwrap();
        board.add(c([5, 5, 5, 5, 5]), Category::Fives).unwrap();
        board.add(c([3, 3, 3, 3, 3]), Category::Threes).unwrap();

        assert_eq!(board.upper_section_total(), 75);
        assert_eq!(board.upper_section_bonus(), UPPER_BONUS);
        assert_eq!(board.score(), 110);
    }

    #[test]
    fn bonus_threshold_is_inclusive_at_63() {
        // 3*1 + 3*2 + 3*3 + 3*4 + 3*5 + 3*6 = 63
        let mut board = ScoreBoard::new();
        for cat in Category::UPPER_SECTION {
            let f = cat.face().unwrap();
            let other = if f == 6 { 5 } else { 6 };
            board.add(c([f, f, f, other, other]), cat).unwrap();
        }
        assert_eq!(board.upper_section_total(), 63);
        assert_eq!(board.upper_section_bonus(), 35);
        assert_eq!(board.score(), 98);
    }

    #[test]
    fn bonus_withheld_at_62() {
        let mut board = ScoreBoard::new();
        board.add(c([6, 6, 6, 6, 6]), Category::Sixs).unwrap(); // 30
        board.add(c([5, 5, 5, 5, 5]), Category::Fives).unwrap(); // 25
        board.add(c([3, 3, 1, 1, 1]), Category::Threes).unwrap(); // 6
        board.add(c([1, 2, 3, 4, 5]), Category::Aces).unwrap(); // 1
        assert_eq!(board.upper_section_total(), 62);
        assert_eq!(board.upper_section_bonus(), 0);
        assert_eq!(board.score(), 62);
    }

    #[test]
    fn lower_section_does_not_count_toward_bonus() {
        let mut board = ScoreBoard::new();
        board.add(c([6, 6, 6, 6, 6]), Category::Yacht).unwrap();
        board.add(c([6, 6, 6, 6, 6]), Category::Choice).unwrap();
        board.add(c([6, 6, 6, 6, 5]), Category::FourOfAKind).unwrap();
        assert_eq!(board.upper_section_total(), 0);
        assert_eq!(board.upper_section_bonus(), 0);
        assert_eq!(board.score(), 50 + 30 + 29);
    }

    #[test]
    fn rows_and_open_categories() {
        let mut board = ScoreBoard::new();
        assert!(board.is_empty());
        assert!(!board.is_complete());
        assert_eq!(board.open_categories().count(), 12);

        board.add(c([2, 3, 4, 5, 6]), Category::LargeStraight).unwrap();
        board.add(c([1, 1, 1, 1, 1]), Category::Aces).unwrap();

        let rows: Vec<_> = board.rows().map(|e| e.category()).collect();
        assert_eq!(rows, vec![Category::Aces, Category::LargeStraight]);
        assert!(board.contains(Category::Aces));
        assert!(!board.open_categories().any(|cat| cat == Category::Aces));

        for cat in Category::ALL {
            let _ = board.add(c([1, 2, 3, 4, 5]), cat);
        }
        assert!(board.is_complete());
        assert_eq!(board.len(), 12);
        assert_eq!(board.open_categories().count(), 0);
    }

    #[test]
    fn summary_empty_board() {
        let board = ScoreBoard::new();
        let expected = concat!(
            "Aces: \n",
            "Deuces: \n",
            "Threes: \n",
            "Fours: \n",
            "Fives: \n",
            "Sixs: \n",
            "Upper section bonus: \n",
            "Choice: \n",
            "FourOfAKind: \n",
            "FullHouse: \n",
            "SmallStraight: \n",
            "LargeStraight: \n",
            "Yacht: \n",
            "Total: 0",
        );
        assert_eq!(board.summary(), expected);
    }

    #[test]
    fn summary_lists_sorted_dice_and_bonus() {
        let mut board = ScoreBoard::new();
        board.add(c([1, 4, 1, 2, 1]), Category::Aces).unwrap();
        board.add(c([6, 6, 6, 6, 6]), Category::Sixs).unwrap();
        board.add(c([5, 5, 5, 5, 5]), Category::Fives).unwrap();
        board.add(c([3, 3, 3, 3, 3]), Category::Threes).unwrap();
        board.add(c([5, 2, 4, 3, 1]), Category::SmallStraight).unwrap();

        let summary = board.summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], "Aces: 3 (1, 1, 1, 2, 4)");
        assert_eq!(lines[1], "Deuces: ");
        assert_eq!(lines[2], "Threes: 15 (3, 3, 3, 3, 3)");
        assert_eq!(lines[5], "Sixs: 30 (6, 6, 6, 6, 6)");
        assert_eq!(lines[6], "Upper section bonus: 35");
        assert_eq!(lines[7], "Choice: ");
        assert_eq!(lines[10], "SmallStraight: 15 (1, 2, 3, 4, 5)");
        assert_eq!(lines[13], "Total: 123");
        assert_eq!(board.to_string(), summary);
    }

    #[test]
    fn shared_board_keeps_one_entry_per_category_under_contention() {
        let shared = SharedScoreBoard::new();
        let wins = std::sync::atomic::AtomicUsize::new(0);

        std::thread::scope(|s| {
            for face in 1u8..=6 {
                let shared = &shared;
                let wins = &wins;
                s.spawn(move || {
                    let hand = Combination::new([face; 5]).unwrap();
                    if shared.add(hand, Category::Yacht).is_ok() {
                        wins.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(wins.into_inner(), 1);
        let board = shared.into_inner();
        assert_eq!(board.len(), 1);
        assert_eq!(board.get(Category::Yacht).unwrap().score(), 50);
    }

    #[test]
    fn shared_board_snapshot_matches_commits() {
        let shared = SharedScoreBoard::new();
        let e = shared.add(c([2, 2, 2, 3, 3]), Category::FullHouse).unwrap();
        assert_eq!(e.score(), 12);
        assert!(shared.add(c([2, 2, 2, 3, 3]), Category::FullHouse).is_err());
        assert_eq!(shared.snapshot().score(), 12);
    }
}
