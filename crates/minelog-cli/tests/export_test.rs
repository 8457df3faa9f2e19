use anyhow::{Context, Result};
use minelog_testing::fixtures::{energy_usage, production_day};
use minelog_testing::TestWorld;
use std::path::{Path, PathBuf};

const JANUARY: [&str; 4] = ["--from", "2024-01-01", "--to", "2024-01-31"];

fn bundled_logo() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../minelog-engine/assets/default_logo.png")
}

/// The single exported file in `dir` whose name starts with `prefix`
fn exported_file(dir: &Path, prefix: &str) -> Result<PathBuf> {
    let mut matches: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(prefix))
        })
        .collect();
    anyhow::ensure!(matches.len() == 1, "expected one {} file, found {:?}", prefix, matches);
    matches.pop().context("exported file")
}

fn seeded() -> Result<TestWorld> {
    let world = TestWorld::new().initialized()?;
    world.seed(production_day("2024-01-02", 100.0))?;
    world.seed(production_day("2024-01-03", 120.0))?;
    world.seed(production_day("2024-02-10", 90.0))?;
    Ok(world)
}

#[test]
fn test_csv_export_writes_filtered_rows() -> Result<()> {
    // Given: two January days and one in February
    let world = seeded()?;
    let out = world.temp_dir().join("reports");
    let out_arg = out.to_string_lossy().to_string();

    // When: January is exported as CSV
    let mut args = vec!["export", "production", "--as", "csv", "--output-dir", out_arg.as_str()];
    args.extend(JANUARY);
    let result = world.run_json(args)?;

    // Then: the file holds the header and the January rows, newest first
    assert!(result.success(), "{}", result.stderr());
    let json = result.json()?;
    assert_eq!(json["content"]["rows"], 2);
    assert_eq!(json["content"]["format"], "csv");

    let file = exported_file(&out, "production_")?;
    assert_eq!(file.extension().and_then(|e| e.to_str()), Some("csv"));
    let text = std::fs::read_to_string(&file)?;
    insta::assert_snapshot!(text.trim_end(), @r###"
    Date,Tonnage Crushed (t),Tonnage Hoisted (t),Recovery Rate (%),Efficiency (%),Gold Smelted (g),Notes
    03/01/2024,120.00,130.00,91.50,88.00,12.00,
    02/01/2024,100.00,110.00,91.50,88.00,10.00,
    "###);
    Ok(())
}

#[test]
fn test_csv_export_honours_date_format() -> Result<()> {
    let world = seeded()?;
    let out = world.temp_dir().join("iso");
    let out_arg = out.to_string_lossy().to_string();

    let mut args = vec![
        "export", "production", "--as", "csv", "--output-dir", out_arg.as_str(),
        "--date-format", "%Y-%m-%d",
    ];
    args.extend(JANUARY);
    let result = world.run(args)?;
    assert!(result.success(), "{}", result.stderr());

    let text = std::fs::read_to_string(exported_file(&out, "production_")?)?;
    assert!(text.lines().nth(1).is_some_and(|l| l.starts_with("2024-01-03,")));
    Ok(())
}

#[test]
fn test_invalid_date_format_is_rejected() -> Result<()> {
    let world = seeded()?;

    let mut args = vec!["export", "production", "--as", "csv", "--date-format", "%Q"];
    args.extend(JANUARY);
    let result = world.run(args)?;

    assert!(!result.success());
    Ok(())
}

#[test]
fn test_time_fields_in_date_format_are_rejected() -> Result<()> {
    let world = seeded()?;
    let out = world.temp_dir().join("clock");
    let out_arg = out.to_string_lossy().to_string();

    let mut args = vec![
        "export", "production", "--as", "csv", "--output-dir", out_arg.as_str(),
        "--date-format", "%H:%M",
    ];
    args.extend(JANUARY);
    let result = world.run(args)?;

    assert_eq!(result.status.code(), Some(1), "{}", result.stderr());
    assert!(result.stderr().contains("invalid export.date_format '%H:%M'"));
    assert!(!out.exists());
    Ok(())
}

#[test]
fn test_pdf_export_produces_document() -> Result<()> {
    let world = TestWorld::new().initialized()?;
    world.seed(energy_usage("2024-01-15", 1200.0, 40.0))?;
    let out = world.temp_dir().join("pdf");
    let out_arg = out.to_string_lossy().to_string();

    let mut args = vec![
        "export", "energy", "--as", "pdf", "--theme", "dark", "--output-dir", out_arg.as_str(),
    ];
    args.extend(JANUARY);
    let result = world.run(args)?;

    assert!(result.success(), "{}", result.stderr());
    assert!(result.stdout().contains("Exported 1 energy_usage record(s)"));
    let bytes = std::fs::read(exported_file(&out, "energy_usage_")?)?;
    assert!(bytes.starts_with(b"%PDF"));
    Ok(())
}

#[test]
fn test_pdf_export_with_custom_branding() -> Result<()> {
    let world = seeded()?;
    let logo = bundled_logo();
    let logo_arg = logo.to_string_lossy().to_string();

    let set = world.run_json([
        "branding", "set", "--name", "Kopje Gold Mine", "--light-logo", logo_arg.as_str(),
    ])?;
    assert!(set.success(), "{}", set.stderr());
    let json = set.json()?;
    assert_eq!(json["content"]["configured"], true);
    assert_eq!(json["content"]["resolved"]["name"], "Kopje Gold Mine");
    assert_eq!(json["content"]["light_logo"], true);
    assert_eq!(json["content"]["dark_logo"], false);

    let out = world.temp_dir().join("branded");
    let out_arg = out.to_string_lossy().to_string();
    let mut args = vec!["export", "production", "--as", "pdf", "--output-dir", out_arg.as_str()];
    args.extend(JANUARY);
    let result = world.run(args)?;

    assert!(result.success(), "{}", result.stderr());
    let bytes = std::fs::read(exported_file(&out, "production_")?)?;
    assert!(bytes.starts_with(b"%PDF"));
    Ok(())
}

#[test]
fn test_branding_set_keeps_other_fields() -> Result<()> {
    let world = TestWorld::new().initialized()?;
    world.seed(["branding", "set", "--name", "Kopje Gold Mine", "--email", "ops@kopje.example"])?;

    world.seed(["branding", "set", "--tagline", "Deep level mining"])?;

    let json = world.run_json(["branding", "show"])?.json()?;
    assert_eq!(json["content"]["resolved"]["name"], "Kopje Gold Mine");
    assert_eq!(json["content"]["resolved"]["email"], "ops@kopje.example");
    assert_eq!(json["content"]["resolved"]["tagline"], "Deep level mining");
    Ok(())
}

#[test]
fn test_logo_that_is_not_an_image_is_rejected() -> Result<()> {
    let world = TestWorld::new().initialized()?;
    let fake = world.temp_dir().join("logo.png");
    std::fs::write(&fake, "not an image")?;
    let fake_arg = fake.to_string_lossy().to_string();

    let result = world.run(["branding", "set", "--light-logo", fake_arg.as_str()])?;

    assert!(!result.success());
    assert!(result.stderr().contains("is not a usable image"));
    assert!(!world.data_dir().join("branding.json").exists());
    Ok(())
}

#[test]
fn test_branding_clear_restores_defaults() -> Result<()> {
    let world = TestWorld::new().initialized()?;
    world.seed(["branding", "set", "--name", "Kopje Gold Mine"])?;

    let cleared = world.run(["branding", "clear"])?;
    assert!(cleared.success());
    assert!(cleared.stdout().contains("No branding configured"));

    let json = world.run_json(["branding", "show"])?.json()?;
    assert_eq!(json["content"]["configured"], false);
    Ok(())
}
