use movie_db::error::StoreError;
use movie_db::search::SearchOutcome;
use movie_db::store::MovieStore;

#[test]
fn substring_match_is_case_insensitive() {
    let store = MovieStore::seeded();
    match store.search("shawshank").unwrap() {
        SearchOutcome::Exact(matches) => {
            assert_eq!(
                matches,
                vec![("The Shawshank Redemption".to_string(), 9.5)]
            );
        }
        other => panic!("expected exact matches, got {other:?}"),
    }
}

#[test]
fn substring_matches_come_back_in_natural_order() {
    let store = MovieStore::seeded();
    match store.search("godfather").unwrap() {
        SearchOutcome::Exact(matches) => {
            let titles: Vec<&str> = matches.iter().map(|(title, _)| title.as_str()).collect();
            assert_eq!(titles, vec!["The Godfather", "The Godfather: Part II"]);
        }
        other => panic!("expected exact matches, got {other:?}"),
    }
}

#[test]
fn any_substring_hit_suppresses_suggestions() {
    // "Redemption" hits exactly one title; fuzzy scoring never runs
    let store = MovieStore::seeded();
    assert!(matches!(
        store.search("Redemption").unwrap(),
        SearchOutcome::Exact(_)
    ));
}

#[test]
fn misspelled_title_falls_back_to_suggestions() {
    let store = MovieStore::seeded();
    match store.search("Shwshank").unwrap() {
        SearchOutcome::Suggestions(suggestions) => {
            assert_eq!(suggestions[0].0, "The Shawshank Redemption");
            assert!(suggestions[0].1 >= 0.6);
        }
        other => panic!("expected suggestions, got {other:?}"),
    }
}

#[test]
fn suggestions_are_ranked_by_score() {
    let store = MovieStore::seeded();
    match store.search("Godfathr").unwrap() {
        SearchOutcome::Suggestions(suggestions) => {
            let titles: Vec<&str> = suggestions.iter().map(|(title, _)| title.as_str()).collect();
            assert_eq!(titles, vec!["The Godfather", "The Godfather: Part II"]);
            assert!(suggestions[0].1 > suggestions[1].1);
        }
        other => panic!("expected suggestions, got {other:?}"),
    }
}

#[test]
fn suggestions_are_capped_at_three() {
    let mut store = MovieStore::new();
    for title in ["Heat", "Heot", "Heit", "Hext", "Hent"] {
        store.add(title, 7.0).unwrap();
    }
    match store.search("Heaat").unwrap() {
        SearchOutcome::Suggestions(suggestions) => assert!(suggestions.len() <= 3),
        other => panic!("expected suggestions, got {other:?}"),
    }
}

#[test]
fn hopeless_query_yields_no_matches() {
    let store = MovieStore::seeded();
    assert_eq!(
        store.search("zzz_no_such_movie").unwrap(),
        SearchOutcome::NoMatches
    );
}

#[test]
fn blank_query_is_invalid_input() {
    let store = MovieStore::seeded();
    assert!(matches!(
        store.search("   "),
        Err(StoreError::InvalidInput(_))
    ));
}
