use chrono::NaiveDate;
use image::{Rgba, RgbaImage};

use super::*;

fn solid(kind: PanelKind, w: u32, h: u32, v: u8) -> Panel {
    Panel::new(kind, RgbaImage::from_pixel(w, h, Rgba([v, v, v, 255])))
}

fn source(page: usize, h: u32) -> Panel {
    solid(PanelKind::Sources { page }, 1024, h, 100 + page as u8)
}

#[test]
fn header_and_two_pages_without_banner() {
    let panels = PanelSet {
        header: Some(solid(PanelKind::Header, 1024, 341, 10)),
        sources: vec![source(0, 341), source(1, 540)],
        banner: None,
    };
    let pages = merge_panels("evt", panels).unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].index, 1);
    assert_eq!(pages[0].image.dimensions(), (1024, 341 + 341));
    assert_eq!(pages[1].image.dimensions(), (1024, 341 + 540));

    // Header on top, source directly below with no gap.
    assert_eq!(pages[1].image.get_pixel(0, 340).0, [10, 10, 10, 255]);
    assert_eq!(pages[1].image.get_pixel(0, 341).0, [101, 101, 101, 255]);
}

#[test]
fn banner_goes_last_and_width_is_the_max() {
    let panels = PanelSet {
        header: None,
        sources: vec![solid(PanelKind::Sources { page: 0 }, 800, 341, 50)],
        banner: Some(solid(PanelKind::Banner, 1024, 250, 200)),
    };
    let pages = merge_panels("evt", panels).unwrap();
    let img = &pages[0].image;
    assert_eq!(img.dimensions(), (1024, 591));
    assert_eq!(img.get_pixel(0, 0).0, [50, 50, 50, 255]);
    assert_eq!(img.get_pixel(900, 0).0, [0, 0, 0, 255]);
    assert_eq!(img.get_pixel(900, 341).0, [200, 200, 200, 255]);
}

#[test]
fn pages_follow_source_page_index_not_input_order() {
    let panels = PanelSet {
        header: None,
        sources: vec![source(2, 400), source(0, 341), source(1, 380)],
        banner: None,
    };
    let heights: Vec<u32> = merge_panels("evt", panels)
        .unwrap()
        .iter()
        .map(|p| p.image.height())
        .collect();
    assert_eq!(heights, vec![341, 380, 400]);
}

#[test]
fn no_source_panels_aborts_this_event() {
    let panels = PanelSet {
        header: Some(solid(PanelKind::Header, 1024, 341, 0)),
        sources: vec![],
        banner: None,
    };
    let err = merge_panels("evt", panels).unwrap_err();
    assert!(matches!(err, PosterError::Assembly(_)));
    assert!(err.to_string().contains("evt"));
}

#[test]
fn assemble_writes_into_date_sport_league() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(tmp.path(), NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
    let panels = PanelSet {
        header: Some(solid(PanelKind::Header, 1024, 341, 0)),
        sources: vec![source(0, 341)],
        banner: None,
    };
    let written = assemble_poster(&layout, "Soccer", "No_league", "A vs B", panels).unwrap();
    assert_eq!(
        written,
        vec![tmp.path().join("2024-09-01/Soccer/No_league/A vs B_poster_1.png")]
    );
    assert!(written[0].is_file());
}

#[test]
fn failed_assembly_leaves_no_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(tmp.path(), NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
    assert!(assemble_poster(&layout, "Soccer", "L", "evt", PanelSet::default()).is_err());
    assert!(!layout.dir_for("Soccer", "L").exists());
}
