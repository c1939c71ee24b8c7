//! Report export against a small fixed catalog.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use bdsoil_catalog::{Catalog, MarketPrices};
use bdsoil_report::{PageLayout, ReportContent, ReportError, export_pdf, render_pdf, write_csv};
use bdsoil_types::{Crop, Land, LandId, SoilType, UserId};
use chrono::{Local, TimeZone};
use rust_decimal::Decimal;

fn catalog() -> Catalog {
    Catalog::from_parts(
        vec![
            Crop::new("Rice (Aman)".into(), "Kharif (Monsoon)".into(), "Clay Loam".into(), 4.942_1),
            Crop::new("Wheat".into(), "Rabi (Winter)".into(), "Loam".into(), 5.0),
            Crop::new("Lentil".into(), "Rabi (Winter)".into(), "clay loam".into(), 2.0),
        ],
        Vec::new(),
        Vec::new(),
        MarketPrices::from_entries([
            ("Rice (Aman)".to_owned(), Decimal::new(30_000, 0)),
            ("Wheat".to_owned(), Decimal::new(32_000, 0)),
        ]),
    )
}

fn land(id: i64, soil: SoilType, gps: Option<&str>) -> Land {
    Land {
        id: LandId(id),
        user_id: UserId(1),
        location: "Gazipur".to_owned(),
        area: 2.5,
        soil_type: soil,
        gps_coords: gps.map(ToOwned::to_owned),
    }
}

fn content(lands: Vec<Land>) -> ReportContent {
    let at = Local.with_ymd_and_hms(2025, 11, 3, 14, 5, 9).single().unwrap();
    ReportContent::gather("Rahim Uddin", at, lands, &catalog()).unwrap()
}

#[test]
fn csv_lists_only_crops_for_the_users_soils() {
    let report = content(vec![land(1, SoilType::ClayLoam, None)]);
    let mut out = Vec::new();
    write_csv(&report, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "Crop,Season,Soil Type,Yield (t/ha),Price (BDT/ton)",
            "Rice (Aman),Kharif (Monsoon),Clay Loam,4.94,\"30,000 BDT/ton\"",
            "Lentil,Rabi (Winter),clay loam,2.00,Not available",
        ]
    );
}

#[test]
fn no_lands_no_report() {
    let at = Local::now();
    assert!(matches!(
        ReportContent::gather("Rahim", at, Vec::new(), &catalog()),
        Err(ReportError::NoLands)
    ));
}

#[test]
fn file_name_carries_owner_and_timestamp() {
    let report = content(vec![land(1, SoilType::Loam, None)]);
    assert_eq!(report.file_name("pdf"), "Rahim Uddin_BDSoil_Report_20251103_140509.pdf");
}

#[test]
fn sections_cover_summary_lands_crops_and_prices() {
    let report = content(vec![
        land(1, SoilType::Loam, Some("23.99, 90.42")),
        land(2, SoilType::Sandy, None),
    ]);
    let sections = report.sections();
    let headings: Vec<&str> = sections.iter().map(|s| s.heading.as_str()).collect();
    assert_eq!(
        headings,
        ["BDSoil - Agricultural Report", "Land Information", "Crop Recommendations", "Market Prices"]
    );

    let summary = sections.first().unwrap();
    assert_eq!(summary.lines.last().unwrap(), "Date: 2025-11-03 14:05:09");

    let lands = sections.get(1).unwrap();
    assert_eq!(
        lands.lines,
        [
            "Location: Gazipur | Area: 2.5 ha | Soil: Loam | GPS: 23.99, 90.42",
            "Location: Gazipur | Area: 2.5 ha | Soil: Sandy | GPS: -",
        ]
    );

    let crops = sections.get(2).unwrap();
    assert_eq!(crops.lines, ["Crop: Wheat | Yield: 5.00 t/ha"]);

    let prices = sections.get(3).unwrap();
    assert_eq!(prices.lines, ["Rice (Aman): 30,000 BDT/ton", "Wheat: 32,000 BDT/ton"]);
}

#[test]
fn long_land_lists_span_pages() {
    let lands = (1..=40).map(|i| land(i, SoilType::Loam, None)).collect();
    let report = content(lands);
    let pages = PageLayout::LETTER.paginate(&report.sections());
    // Summary, two land pages, crops, prices.
    assert_eq!(pages.len(), 5);
    render_pdf(&report, &PageLayout::LETTER).unwrap();
}

#[test]
fn pdf_is_written_to_the_output_directory() {
    let dir = std::env::temp_dir().join(format!("bdsoil-report-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let report = content(vec![land(1, SoilType::ClayLoam, None)]);
    let path = export_pdf(&report, &dir).unwrap();

    assert!(path.ends_with("Rahim Uddin_BDSoil_Report_20251103_140509.pdf"));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    std::fs::remove_dir_all(&dir).unwrap();
}
