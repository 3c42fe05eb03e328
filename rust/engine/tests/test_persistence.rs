use klondike_engine::engine::{Command, Engine, FixedClock};
use klondike_engine::errors::PersistError;
use klondike_engine::game::{Cursor, PileId};
use klondike_engine::persist::{self, MemoryStore, PersistentStore, STATE_KEY, STATE_LEN};
use klondike_engine::settings::{DrawMode, FlipLimit, ScoreVisibility, Settings};

fn played(seed: u32) -> Engine {
    let settings = Settings {
        draw: DrawMode::Three,
        flip_limit: FlipLimit::Three,
        score: ScoreVisibility::Hide,
    };
    let mut engine = Engine::new_game(settings, &FixedClock(seed));
    engine.apply(Command::AutoSweep);
    for _ in 0..5 {
        engine.apply(Command::DrawOrCancel);
    }
    engine
}

#[test]
fn saved_game_resumes_exactly() {
    let engine = played(1);
    let mut store = MemoryStore::new();
    engine.save(&mut store).unwrap();

    let resumed = Engine::load_or_deal(&store, Settings::default(), &FixedClock(99));
    assert_eq!(resumed.state().stock(), engine.state().stock());
    assert_eq!(resumed.state().tableau(), engine.state().tableau());
    assert_eq!(resumed.state().foundations(), engine.state().foundations());
    assert_eq!(resumed.state().settings(), engine.state().settings());
    assert_eq!(resumed.state().score(), engine.state().score());
    assert_eq!(resumed.state().flips(), engine.state().flips());
    assert_eq!(resumed.state().is_won(), engine.state().is_won());
}

#[test]
fn load_rehomes_cursor_on_talon() {
    let mut engine = played(1);
    engine.apply(Command::Advance);
    engine.apply(Command::Select);
    let mut store = MemoryStore::new();
    engine.save(&mut store).unwrap();
    let resumed = Engine::load_or_deal(&store, Settings::default(), &FixedClock(99));
    assert_eq!(
        resumed.state().cursor(),
        Cursor::SelectingSource {
            selection: PileId::Talon
        }
    );
}

#[test]
fn saved_score_is_little_endian() {
    let engine = played(1);
    let bytes = persist::encode(engine.state()).unwrap();
    assert_eq!(bytes.len(), STATE_LEN);
    let score = i32::from_le_bytes([bytes[78], bytes[79], bytes[80], bytes[81]]);
    assert_eq!(score, engine.state().score());
    // draw three, flip limit three, score hidden
    assert_eq!(&bytes[73..76], &[1, 3, 1]);
}

#[test]
fn short_buffer_deals_fresh_game() {
    let engine = played(5);
    let bytes = persist::encode(engine.state()).unwrap();
    let mut store = MemoryStore::new();
    store.write(STATE_KEY, &bytes[..STATE_LEN - 1]).unwrap();

    assert_eq!(
        persist::load_state(&store),
        Err(PersistError::Truncated {
            expected: STATE_LEN,
            actual: STATE_LEN - 1
        })
    );
    let fresh = Engine::load_or_deal(&store, Settings::default(), &FixedClock(1));
    let expected = Engine::new_game(Settings::default(), &FixedClock(1));
    assert_eq!(fresh.state(), expected.state());
    assert_eq!(fresh.state().score(), -52);
}

#[test]
fn missing_save_deals_fresh_game() {
    let store = MemoryStore::new();
    assert_eq!(persist::load_state(&store), Err(PersistError::NotFound));
    let engine = Engine::load_or_deal(&store, Settings::default(), &FixedClock(3));
    assert_eq!(engine.state().score(), -52);
    assert_eq!(engine.state().card_count(), 52);
}

#[test]
fn corrupt_card_deals_fresh_game() {
    let engine = played(8);
    let mut bytes = persist::encode(engine.state()).unwrap();
    bytes[20] = 60;
    let mut store = MemoryStore::new();
    store.write(STATE_KEY, &bytes).unwrap();
    assert!(matches!(
        persist::load_state(&store),
        Err(PersistError::Corrupt(_))
    ));
    let fresh = Engine::load_or_deal(&store, Settings::default(), &FixedClock(8));
    assert_eq!(fresh.state().score(), -52);
    assert_eq!(fresh.state().settings(), Settings::default());
}

#[test]
fn swapped_card_breaks_conservation() {
    let engine = played(8);
    let mut bytes = persist::encode(engine.state()).unwrap();
    // two stock slots holding the same card
    bytes[21] = bytes[20];
    assert!(matches!(
        persist::decode(&bytes),
        Err(PersistError::Corrupt(_))
    ));
}

#[test]
fn longer_buffer_still_loads() {
    let engine = played(2);
    let mut bytes = persist::encode(engine.state()).unwrap().to_vec();
    bytes.extend_from_slice(&[0xAA; 16]);
    let state = persist::decode(&bytes).unwrap();
    assert_eq!(state.stock(), engine.state().stock());
    assert_eq!(state.score(), engine.state().score());
}

#[test]
fn won_game_round_trips_win_flag() {
    let engine = played(4);
    let mut bytes = persist::encode(engine.state()).unwrap();
    assert_eq!(bytes[72], 0);
    bytes[72] = 7;
    let state = persist::decode(&bytes).unwrap();
    assert!(state.is_won());
}

#[test]
fn fully_hidden_pile_loads_with_top_card_showing() {
    let engine = Engine::new_game(Settings::default(), &FixedClock(1));
    let mut bytes = persist::encode(engine.state()).unwrap();
    // pile 6 holds seven cards; mark all of them face down
    bytes[13 + 6] = 7;
    let mut store = MemoryStore::new();
    store.write(STATE_KEY, &bytes).unwrap();

    let mut resumed = Engine::load_or_deal(&store, Settings::default(), &FixedClock(99));
    assert_eq!(resumed.state().tableau()[6].len(), 7);
    assert_eq!(resumed.state().tableau()[6].hidden_count(), 6);

    assert!(resumed.apply(Command::AutoSweep));
    let view = resumed.view();
    assert_eq!(view.tableau[6].hidden, 5);
    assert_eq!(view.tableau[6].face_up.len(), 1);
    assert_eq!(resumed.state().score(), -37);
}
