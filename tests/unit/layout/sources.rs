use super::*;

fn display_order(raw: &[&str]) -> Vec<String> {
    order_sources(raw).iter().map(SourceEntry::display).collect()
}

#[test]
fn parse_splits_on_first_separator_and_trims() {
    let e = SourceEntry::parse(" United States : ESPN ");
    assert_eq!(e.region(), "United States");
    assert_eq!(e.channel(), Some("ESPN"));

    let e = SourceEntry::parse("Canada:TSN:2");
    assert_eq!(e.region(), "Canada");
    assert_eq!(e.channel(), Some("TSN:2"));

    let e = SourceEntry::parse("Worldwide stream");
    assert_eq!(e.region(), "Worldwide stream");
    assert_eq!(e.channel(), None);
}

#[test]
fn priority_regions_lead_then_alphabetical() {
    let ordered = display_order(&[
        "Spain:DAZN",
        "United States:ESPN",
        "Australia:Kayo",
        "United Kingdom:Sky Sports F1 HD",
        "United States:ABC",
        "United Kingdom:BBC One",
    ]);
    assert_eq!(
        ordered,
        vec![
            "United Kingdom:  BBC One",
            "United Kingdom:  Sky Sports F1 HD",
            "United States:  ABC",
            "United States:  ESPN",
            "Australia:  Kayo",
            "Spain:  DAZN",
        ]
    );
}

#[test]
fn normalized_feed_example_keeps_fixed_order() {
    let ordered = display_order(&["United Kingdom:Sky Sports F1 HD", "United States:ESPN", "Spain:DAZN"]);
    assert_eq!(ordered[0], "United Kingdom:  Sky Sports F1 HD");
    assert_eq!(ordered[1], "United States:  ESPN");
    assert_eq!(ordered[2], "Spain:  DAZN");
}

#[test]
fn priority_match_is_exact_region_not_prefix() {
    let ordered = display_order(&["United Kingdomish:X", "Albania:Y", "United Kingdom:Z"]);
    assert_eq!(
        ordered,
        vec!["United Kingdom:  Z", "Albania:  Y", "United Kingdomish:  X"]
    );
}

#[test]
fn tiers_are_respected_for_every_permutation_prefix() {
    let raw = [
        "Spain:DAZN",
        "United States:NBC",
        "United Kingdom:TNT",
        "Brazil:Globo",
        "United Kingdom:BT",
        "United States:CBS",
    ];
    for rot in 0..raw.len() {
        let mut input = raw.to_vec();
        input.rotate_left(rot);
        let entries = order_sources(&input);
        let tiers: Vec<usize> = entries.iter().map(|e| e.tier()).collect();
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]), "{tiers:?}");
        for pair in entries.windows(2) {
            if pair[0].tier() == pair[1].tier() {
                assert!(pair[0].canonical() <= pair[1].canonical());
            }
        }
    }
}

#[test]
fn empty_input_becomes_sentinel() {
    let ordered = display_order(&[]);
    assert_eq!(ordered, vec![NO_SOURCES_SENTINEL.to_string()]);
}

#[test]
fn format_is_idempotent() {
    for raw in ["United States:ESPN", "United States: ESPN", "Spain", "Spain:", "a:b:c"] {
        let once = format_source(raw);
        let twice = format_source(&once);
        assert_eq!(once, twice, "{raw}");
        assert!(!twice.contains(":   "));
    }
    assert_eq!(format_source("United States:ESPN"), "United States:  ESPN");
    assert_eq!(format_source("Spain"), "Spain");
}

#[test]
fn twenty_three_sources_split_eight_eight_seven() {
    assert_eq!(page_sizes(23, 10), vec![8, 8, 7]);
    assert_eq!(page_sizes(10, 10), vec![10]);
    assert_eq!(page_sizes(11, 10), vec![6, 5]);
    assert_eq!(page_sizes(1, 10), vec![1]);
    assert!(page_sizes(0, 10).is_empty());
}

#[test]
fn pagination_partitions_without_loss() {
    for total in 0..=75usize {
        let items: Vec<usize> = (0..total).collect();
        let pages = split_pages(&items);
        let flat: Vec<usize> = pages.iter().flat_map(|p| p.iter().copied()).collect();
        assert_eq!(flat, items);

        if total > 0 {
            assert_eq!(pages.len(), total.div_ceil(SOURCES_PER_PAGE));
            let min = pages.iter().map(|p| p.len()).min().unwrap();
            let max = pages.iter().map(|p| p.len()).max().unwrap();
            assert!(max - min <= 1);
            assert!(max <= SOURCES_PER_PAGE);
        }
    }
}

#[test]
fn short_pages_use_minimum_height() {
    let mut engine = TextEngine::new();
    let pages =
        plan_source_pages(&mut engine, &Typeface::estimated(), &["United States:ESPN"]).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].wrapped_line_count, 1);
    assert_eq!(pages[0].height, PANEL_MIN_HEIGHT);
    assert_eq!(pages[0].block_top(), (341 - 50) / 2);
}

#[test]
fn full_page_grows_with_line_count() {
    let raw: Vec<String> = (0..10).map(|i| format!("Region{i}:Channel")).collect();
    let mut engine = TextEngine::new();
    let pages = plan_source_pages(&mut engine, &Typeface::estimated(), &raw).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].height, 10 * 50 + 40);
    assert_eq!(pages[0].block_top(), 20);
}

#[test]
fn wrapped_entries_add_height_but_not_draw_rows() {
    let long = format!("Spain:{}", vec!["Movistar Liga de Campeones"; 3].join(" "));
    let mut engine = TextEngine::new();
    let pages = plan_source_pages(&mut engine, &Typeface::estimated(), &[long.as_str()]).unwrap();
    let page = &pages[0];
    assert_eq!(page.lines.len(), 1);
    assert!(page.wrapped_line_count >= 2);
    assert_eq!(
        page.height,
        (page.wrapped_line_count as u32 * 50 + 40).max(PANEL_MIN_HEIGHT)
    );
}

#[test]
fn rendered_pages_match_plan() {
    let raw: Vec<String> = (0..23).map(|i| format!("Country{i:02}:Channel")).collect();
    let mut engine = TextEngine::new();
    let face = Typeface::estimated();
    let plan = plan_source_pages(&mut engine, &face, &raw).unwrap();
    let panels = render_source_pages(&mut engine, &face, &raw).unwrap();
    assert_eq!(panels.len(), 3);
    for (i, (panel, page)) in panels.iter().zip(&plan).enumerate() {
        assert_eq!(panel.kind(), PanelKind::Sources { page: i });
        assert_eq!(panel.width(), CANVAS_WIDTH);
        assert_eq!(panel.height(), page.height);
    }
    let counts: Vec<usize> = plan.iter().map(|p| p.lines.len()).collect();
    assert_eq!(counts, vec![8, 8, 7]);
}

#[test]
fn embedded_face_draws_rows_inside_the_centred_block() {
    let face = Typeface::embedded();
    let mut engine = TextEngine::new();
    let plan = plan_source_pages(&mut engine, &face, &["United States:ESPN"]).unwrap();
    let panels = render_source_pages(&mut engine, &face, &["United States:ESPN"]).unwrap();
    let top = plan[0].block_top();
    assert_eq!(top, 145);

    let img = panels[0].image();
    let mut inside = 0usize;
    let (mut min_x, mut max_x) = (u32::MAX, 0u32);
    for (x, y, px) in img.enumerate_pixels() {
        if px.0[0] >= 128 {
            continue;
        }
        assert!(
            (top..top + 50).contains(&y),
            "ink at row {y} outside [{top}, {})",
            top + 50
        );
        inside += 1;
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    assert!(inside > 0, "no glyphs drawn");
    let centre = (min_x + max_x) / 2;
    assert!(centre.abs_diff(CANVAS_WIDTH / 2) < 16, "ink centred at {centre}");
}
