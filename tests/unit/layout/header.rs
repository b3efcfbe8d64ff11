use image::{Rgb, RgbImage, Rgba, RgbaImage};

use super::*;

fn plan(content: &HeaderContent<'_>) -> HeaderPlan {
    let mut engine = TextEngine::new();
    plan_header(&mut engine, &Typeface::estimated(), content).unwrap()
}

#[test]
fn short_title_keeps_max_size_and_is_centered() {
    let p = plan(&HeaderContent {
        title: "Team A vs Team B",
        ..Default::default()
    });
    assert_eq!(p.title.size_px, 100.0);
    assert_eq!(p.title.y, 10.0);
    // 16 chars * 100 px * 0.55 = 880 px wide.
    assert_eq!(p.title.x, 72.0);
    assert_eq!(p.underline.0, p.title.x);
    assert_eq!(p.underline.2, p.title.x + 880.0);
    assert_eq!(p.underline.3 - p.underline.1, 5.0);
    assert!(p.underline.1 > p.title.y + f64::from(p.title.extent.height));
}

#[test]
fn long_title_shrinks_in_steps_of_five() {
    let title = "A".repeat(40);
    let p = plan(&HeaderContent {
        title: &title,
        ..Default::default()
    });
    // 22 px per char at 40 px: 880 <= 984, while 45 px gives 990.
    assert_eq!(p.title.size_px, 40.0);
}

#[test]
fn absurd_title_degrades_to_minimum_size() {
    let title = "W".repeat(500);
    let p = plan(&HeaderContent {
        title: &title,
        ..Default::default()
    });
    assert_eq!(p.title.size_px, 20.0);
}

#[test]
fn venue_shrinks_against_logo_safe_width() {
    let p = plan(&HeaderContent {
        title: "X",
        venue: Some("Autodromo Internazionale Monza"),
        ..Default::default()
    });
    let venue = &p.sub_lines[0];
    assert!(venue.text.starts_with("Venue: "));
    // 37 chars: 24 px gives 488.4 <= 504, 26 px gives 529.1.
    assert_eq!(venue.size_px, 24.0);
    assert_eq!(venue.y, 150.0);
}

#[test]
fn sub_lines_stack_without_gaps_for_missing_fields() {
    let p = plan(&HeaderContent {
        title: "X",
        date: Some("2024/09/01"),
        uk_time: Some("02:00 PM"),
        utc_time: Some("01:00 PM"),
        ..Default::default()
    });
    let rows: Vec<(&str, f64, f32)> = p
        .sub_lines
        .iter()
        .map(|l| (l.text.as_str(), l.y, l.size_px))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Date: 2024/09/01", 150.0, 40.0),
            ("UK Time: 02:00 PM", 200.0, 40.0),
            ("UTC Time: 01:00 PM", 250.0, 40.0),
        ]
    );
}

#[test]
fn logo_boxes_sit_in_bottom_corners() {
    let p = plan(&HeaderContent {
        title: "X",
        ..Default::default()
    });
    assert_eq!(p.away_logo_at, (10, 131));
    assert_eq!(p.home_logo_at, (814, 131));
}

#[test]
fn render_pastes_opaque_logo_and_masks_transparent_logo() {
    let away = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, Rgb([200, 0, 0])));
    let home = DynamicImage::ImageRgba8(RgbaImage::from_pixel(50, 50, Rgba([0, 0, 200, 0])));
    let content = HeaderContent {
        title: "Team A vs Team B",
        away_logo: Some(&away),
        home_logo: Some(&home),
        ..Default::default()
    };

    let mut engine = TextEngine::new();
    let panel = render_header(&mut engine, &Typeface::estimated(), &content).unwrap();
    assert_eq!(panel.kind(), PanelKind::Header);
    assert_eq!((panel.width(), panel.height()), (1024, 341));

    let img = panel.image();
    let [r, g, b, a] = img.get_pixel(50, 250).0;
    assert!(r > 190 && g < 10 && b < 10 && a == 255);
    assert_eq!(img.get_pixel(900, 250).0, [255, 255, 255, 255]);
    // Underline under the title.
    assert_eq!(img.get_pixel(500, 135).0, [0, 0, 0, 255]);
}

fn dark_pixels_in_rows(img: &RgbaImage, rows: std::ops::Range<u32>) -> usize {
    rows.flat_map(|y| (0..img.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| img.get_pixel(x, y).0[0] < 128)
        .count()
}

#[test]
fn embedded_face_draws_every_text_line() {
    let content = HeaderContent {
        title: "Team A vs Team B",
        venue: Some("Wembley Stadium"),
        date: Some("2024/09/01"),
        uk_time: Some("04:30 PM"),
        utc_time: Some("03:30 PM"),
        ..Default::default()
    };
    let face = Typeface::embedded();
    let mut engine = TextEngine::new();
    let plan = plan_header(&mut engine, &face, &content).unwrap();
    let panel = render_header(&mut engine, &face, &content).unwrap();
    let img = panel.image();

    let underline_top = plan.underline.1.floor() as u32;
    assert!(dark_pixels_in_rows(img, 0..underline_top) > 0, "title not drawn");
    for line in &plan.sub_lines {
        let top = line.y as u32;
        assert!(
            dark_pixels_in_rows(img, top..top + 50) > 0,
            "'{}' not drawn",
            line.text
        );
    }
}
