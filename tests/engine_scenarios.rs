use speller_core::core::engine::next_letter_frequency;
use speller_core::core::types::ALPHABET;
use speller_core::corpus::embedded_source;
use speller_core::persistence::{load_dictionary, save_dictionary};
use speller_core::{
    Dictionary, DisplayMode, EngineConfig, SelectionError, SelectionMethod, Sentence, Speller, WordEngine,
};
use std::collections::BTreeMap;
use std::sync::Arc;

fn shared_dictionary() -> Arc<Dictionary> {
    Arc::new(Dictionary::from_words(embedded_source()))
}

fn candidates(engine: &WordEngine) -> Vec<String> {
    engine.candidates().map(str::to_string).collect()
}

#[test]
fn empty_prefix_lists_whole_dictionary() {
    let dict = shared_dictionary();
    let engine = WordEngine::new(dict.clone(), EngineConfig::default()).unwrap();
    let all: Vec<String> = dict.iter().map(|e| e.word.clone()).collect();
    assert_eq!(candidates(&engine), all);
}

#[test]
fn candidates_share_prefix_and_shrink() {
    let mut engine = WordEngine::new(shared_dictionary(), EngineConfig::default()).unwrap();
    let mut previous = engine.candidate_count();
    for letter in "thin".chars() {
        engine.select_letter(letter).unwrap();
        let prefix = engine.prefix().to_string();
        assert!(engine.candidates().all(|w| w.starts_with(&prefix)));
        assert!(engine.candidate_count() <= previous);
        previous = engine.candidate_count();
    }
    assert!(engine.candidates().any(|w| w == "thing"));
}

#[test]
fn undo_is_left_inverse_of_select() {
    let mut engine = WordEngine::new(shared_dictionary(), EngineConfig::default()).unwrap();
    for prefix in ["", "w", "wa", "q"] {
        engine.reset();
        for c in prefix.chars() {
            engine.select_letter(c).unwrap();
        }
        let before = candidates(&engine);
        for c in ALPHABET {
            engine.select_letter(c).unwrap();
            engine.undo();
            assert_eq!(candidates(&engine), before, "prefix {:?} letter {}", prefix, c);
        }
    }
}

#[test]
fn next_letter_scan_matches_example() {
    let dict = Dictionary::from_frequencies([("bat", 4), ("bad", 6), ("bag", 1)]);
    assert_eq!(next_letter_frequency(&dict, "b").next_letters, BTreeMap::from([('a', 11)]));
    let scan = next_letter_frequency(&dict, "ba");
    assert_eq!(scan.next_letters, BTreeMap::from([('d', 6), ('g', 1), ('t', 4)]));
    assert_eq!(scan.candidates, vec![0, 1, 2]);
    assert!(next_letter_frequency(&dict, "bad").next_letters.is_empty());
}

#[test]
fn sessions_do_not_share_state() {
    let dict = shared_dictionary();
    let mut first = WordEngine::new(dict.clone(), EngineConfig::default()).unwrap();
    let second = WordEngine::new(dict, EngineConfig::default()).unwrap();
    first.select_letter('w').unwrap();
    assert_eq!(first.prefix(), "w");
    assert_eq!(second.prefix(), "");
    assert!(second.candidate_count() > first.candidate_count());
}

#[test]
fn grid_stays_within_caps_while_spelling() {
    let config = EngineConfig { max_rows: 5, max_cols: 6, ..Default::default() };
    let mut engine = WordEngine::new(shared_dictionary(), config).unwrap();
    for mode in [DisplayMode::Clearing, DisplayMode::Shrinking] {
        engine.reset();
        engine.set_display_mode(mode);
        for c in "water".chars() {
            let grid = engine.grid();
            assert!(grid.rows() <= 5 && grid.cols() <= 6);
            if mode == DisplayMode::Clearing {
                assert_eq!((grid.rows(), grid.cols()), (5, 6));
            }
            let cols = grid.cols();
            assert!(grid.iter_rows().all(|row| row.len() == cols));
            engine.select_letter(c).unwrap();
        }
    }
}

#[test]
fn blank_and_out_of_range_leave_state() {
    let mut engine = WordEngine::new(shared_dictionary(), EngineConfig::default()).unwrap();
    engine.select_letter('q').unwrap();
    let before = engine.view();
    // only 'u' follows 'q' in the word list, so 'a' at (0, 0) is blank
    assert!(matches!(engine.select_cell(0, 0), Err(SelectionError::BlankSelected { row: 0, col: 0 })));
    assert!(engine.select_cell(0, 999).unwrap_err().is_out_of_range());
    assert_eq!(engine.view(), before);
}

#[test]
fn spelling_a_sentence_through_the_speller_trait() {
    let dict = Dictionary::from_frequencies([("i", 9), ("need", 4), ("needle", 1), ("water", 3), ("want", 2)]);
    let mut engine = WordEngine::new(Arc::new(dict), EngineConfig::default()).unwrap();
    let speller: &mut dyn Speller = &mut engine;
    speller.set_display_mode(SelectionMethod::GridPoint.display_mode());
    let mut sentence = Sentence::new();

    // the shrinking grid starts as  i n / w _
    assert_eq!(SelectionMethod::GridPoint.choose(speller, 0, 0), Ok('i'));
    assert!(speller.is_done());
    sentence.push(speller.commit().unwrap());

    // "need", then the user finishes early
    assert_eq!(SelectionMethod::GridPoint.choose(speller, 0, 1), Ok('n'));
    for _ in 0..3 {
        SelectionMethod::GridPoint.choose(speller, 0, 0).unwrap();
    }
    assert_eq!(speller.prefix(), "need");
    assert!(!speller.is_done());
    sentence.push(speller.commit().unwrap());

    // "wa" narrows to water/want; take the first suggestion
    let (row, col) = SelectionMethod::GridPoint.resolve(speller.grid(), 1, 0).unwrap();
    assert_eq!(speller.select_cell(row, col), Ok('w'));
    speller.select_cell(0, 0).unwrap();
    assert_eq!(speller.suggestions(), vec!["water", "want"]);
    sentence.push(speller.suggestions()[0]);
    speller.reset();

    assert_eq!(sentence.text(), "i need water");
}

#[test]
fn snapshot_round_trip_drives_same_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.bin");
    let dict = Dictionary::from_words(embedded_source());
    save_dictionary(&dict, &path).unwrap();
    let loaded = load_dictionary(&path).unwrap();

    let mut a = WordEngine::with_defaults(dict);
    let mut b = WordEngine::with_defaults(loaded);
    for c in "he".chars() {
        a.select_letter(c).unwrap();
        b.select_letter(c).unwrap();
    }
    assert_eq!(a.view(), b.view());
}

#[test]
fn letters_typed_through_the_trait_match_grid_picks() {
    let dict = shared_dictionary();
    let mut typed = WordEngine::new(dict.clone(), EngineConfig::default()).unwrap();
    let mut picked = WordEngine::new(dict, EngineConfig::default()).unwrap();
    {
        let speller: &mut dyn Speller = &mut typed;
        speller.select_letter('h').unwrap();
        speller.select_letter('E').unwrap();
        assert_eq!(speller.select_letter('?'), Err(SelectionError::NotALetter('?')));
    }
    // clearing layout keeps the alphabet in place: h is (1, 2), e is (0, 4)
    assert_eq!(picked.select_cell(1, 2), Ok('h'));
    assert_eq!(picked.select_cell(0, 4), Ok('e'));
    assert_eq!(typed.view(), picked.view());
}
