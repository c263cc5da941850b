use std::num::NonZeroUsize;

use card_catalog::dataset::{self, load_dataset_reader};
use card_catalog::search;
use card_catalog::store::{CollectionRepo, NewProfile, SqliteRepo};
use card_catalog::view::{self, SortKey, ViewMode, ViewQuery};
use diesel::SqliteConnection;

mod common;

const NAMED_CSV: &str = "\
full_name,name,set,number,illustrator,release_date,image_url,visual_category,color_category
Pikachu VMAX (Vivid Voltage 44/185),Pikachu VMAX,Vivid Voltage,44/185,Midori,2020-11-13,,Action,Yellow
Celebi (Celebrations 1/25),Celebi,Celebrations,1/25,Aka,2021-10-08,,Forest,Green
Eevee (Celebrations 12/25),Eevee,Celebrations,12/25,Aka,2021-10-08,,Portrait,Brown
Évoli (Celebrations 5/25),Évoli,Celebrations,5/25,Shiro,2021-10-08,,,
";

fn generated_csv(rows: usize) -> String {
    let mut out = String::from(
        "full_name,name,set,number,illustrator,release_date,image_url,visual_category,color_category\n",
    );
    for i in 0..rows {
        let (set, year) = if i % 2 == 0 {
            ("Celebrations", "2021")
        } else {
            ("Vivid Voltage", "2020")
        };
        out.push_str(&format!(
            "Card {i:02} ({set} {i}),Card {i:02},{set},{i}/99,Illu {},{year}-01-01,,,\n",
            i % 3
        ));
    }
    out
}

fn setup_profile(conn: &mut SqliteConnection, repo: &SqliteRepo) -> i64 {
    repo.create_profile(
        conn,
        &NewProfile {
            first_name: "Lena",
            last_name: "Moreau",
            age: 9,
            portrait: None,
        },
    )
    .expect("create profile")
}

#[test]
fn wishlist_and_owned_views_reflect_stored_flags() {
    let (_db, mut conn) = common::setup_db();
    let repo = SqliteRepo::new();
    let user = setup_profile(&mut conn, &repo);

    let (snap, _) = load_dataset_reader(NAMED_CSV.as_bytes()).expect("load dataset");

    repo.set_wanted(&mut conn, user, "Pikachu VMAX (Vivid Voltage 44/185)", true)
        .expect("want pikachu");
    repo.set_wanted(&mut conn, user, "Celebi (Celebrations 1/25)", true)
        .expect("want celebi");
    repo.set_owned(&mut conn, user, "Celebi (Celebrations 1/25)", true)
        .expect("own celebi");
    repo.set_owned(&mut conn, user, "Eevee (Celebrations 12/25)", true)
        .expect("own eevee");

    let preferences = repo.preferences(&mut conn, user).expect("load flags");
    let cards = view::annotate(snap.entries(), &preferences);

    // Owned cards drop out of the shopping list even when still wanted.
    let wishlist = view::filter_cards(
        cards.clone(),
        &ViewQuery {
            mode: ViewMode::Wishlist,
            ..ViewQuery::default()
        },
    );
    let names: Vec<&str> = wishlist.iter().map(|c| c.entry.name.as_str()).collect();
    assert_eq!(names, ["Pikachu VMAX"]);

    let owned = view::filter_cards(
        cards,
        &ViewQuery {
            mode: ViewMode::Owned,
            ..ViewQuery::default()
        },
    );
    let names: Vec<&str> = owned.iter().map(|c| c.entry.name.as_str()).collect();
    assert_eq!(names, ["Celebi", "Eevee"]);
}

#[test]
fn full_catalog_pages_split_at_page_size() {
    let (_db, mut conn) = common::setup_db();
    let repo = SqliteRepo::new();
    let user = setup_profile(&mut conn, &repo);

    let csv = generated_csv(30);
    let (snap, report) = load_dataset_reader(csv.as_bytes()).expect("load dataset");
    assert_eq!(report.rows_loaded, 30);

    let preferences = repo.preferences(&mut conn, user).expect("load flags");
    let cards = view::annotate(snap.entries(), &preferences);
    let cards = view::filter_cards(cards, &ViewQuery::default());

    let size = NonZeroUsize::new(12).unwrap();
    assert_eq!(view::page_count(cards.len(), size), 3);

    let first = view::paginate(&cards, size, 1);
    assert_eq!(first.len(), 12);
    assert_eq!(first[0].entry.name, "Card 00");

    let last = view::paginate(&cards, size, 3);
    assert_eq!(last.len(), 6);
    assert_eq!(last[5].entry.name, "Card 29");

    assert!(view::paginate(&cards, size, 4).is_empty());
}

#[test]
fn text_query_snaps_to_catalog_term_before_filtering() {
    let (_db, mut conn) = common::setup_db();
    let repo = SqliteRepo::new();
    let user = setup_profile(&mut conn, &repo);

    let (snap, _) = load_dataset_reader(NAMED_CSV.as_bytes()).expect("load dataset");
    repo.set_wanted(&mut conn, user, "Pikachu VMAX (Vivid Voltage 44/185)", true)
        .expect("want pikachu");

    let pool = snap.search_pool();
    let matched = search::approximate_match("pikachu", pool.iter().map(String::as_str))
        .expect("match for non-empty pool");
    assert_eq!(matched, "Pikachu VMAX");

    let preferences = repo.preferences(&mut conn, user).expect("load flags");
    let cards = view::annotate(snap.entries(), &preferences);
    let filtered = view::filter_cards(
        cards,
        &ViewQuery {
            text: Some(matched.to_string()),
            ..ViewQuery::default()
        },
    );

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].entry.name, "Pikachu VMAX");
    assert!(filtered[0].wanted);

    // Accented catalog terms round-trip through the same path.
    let matched = search::approximate_match("evoli", pool.iter().map(String::as_str))
        .expect("match for accented name");
    assert_eq!(matched, "Évoli");
}

#[test]
fn owned_view_sorts_by_visual_category_with_uncategorized_last() {
    let (_db, mut conn) = common::setup_db();
    let repo = SqliteRepo::new();
    let user = setup_profile(&mut conn, &repo);

    let (snap, _) = load_dataset_reader(NAMED_CSV.as_bytes()).expect("load dataset");
    for key in [
        "Pikachu VMAX (Vivid Voltage 44/185)",
        "Celebi (Celebrations 1/25)",
        "Eevee (Celebrations 12/25)",
        "Évoli (Celebrations 5/25)",
    ] {
        repo.set_owned(&mut conn, user, key, true).expect("own");
    }

    let preferences = repo.preferences(&mut conn, user).expect("load flags");
    let cards = view::annotate(snap.entries(), &preferences);
    let mut owned = view::filter_cards(
        cards,
        &ViewQuery {
            mode: ViewMode::Owned,
            ..ViewQuery::default()
        },
    );

    view::sort_for_collection(&mut owned, &[SortKey::VisualCategory]);
    let names: Vec<&str> = owned.iter().map(|c| c.entry.name.as_str()).collect();
    assert_eq!(names, ["Pikachu VMAX", "Celebi", "Eevee", "Évoli"]);
}

#[test]
fn installed_snapshot_is_visible_process_wide() {
    let (snap, _) = load_dataset_reader(NAMED_CSV.as_bytes()).expect("load dataset");
    dataset::install_catalog(snap);

    let shared = dataset::snapshot();
    assert_eq!(shared.len(), 4);
    assert_eq!(shared.set_labels(), ["2020 - Vivid Voltage", "2021 - Celebrations"]);
}
