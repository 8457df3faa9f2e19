//! Argument builders for seeding a workspace through the CLI.

/// `production add` for one day; hoisted and smelted follow from `crushed`
pub fn production_day(date: &str, crushed: f64) -> Vec<String> {
    vec![
        "production".to_string(),
        "add".to_string(),
        "--date".to_string(),
        date.to_string(),
        "--crushed".to_string(),
        crushed.to_string(),
        "--hoisted".to_string(),
        (crushed + 10.0).to_string(),
        "--recovery".to_string(),
        "91.5".to_string(),
        "--efficiency".to_string(),
        "88".to_string(),
        "--smelted".to_string(),
        (crushed / 10.0).to_string(),
    ]
}

/// `energy add` with fixed unit costs
pub fn energy_usage(date: &str, kwh: f64, diesel: f64) -> Vec<String> {
    vec![
        "energy".to_string(),
        "add".to_string(),
        "--date".to_string(),
        date.to_string(),
        "--kwh".to_string(),
        kwh.to_string(),
        "--electricity-cost".to_string(),
        (kwh * 0.1).to_string(),
        "--diesel".to_string(),
        diesel.to_string(),
        "--diesel-cost".to_string(),
        (diesel * 1.5).to_string(),
    ]
}

/// `chemical catalog add`
pub fn catalog_chemical(name: &str, unit_price: f64, stock: f64, minimum: f64) -> Vec<String> {
    vec![
        "chemical".to_string(),
        "catalog".to_string(),
        "add".to_string(),
        "--name".to_string(),
        name.to_string(),
        "--unit".to_string(),
        "kg".to_string(),
        "--unit-price".to_string(),
        unit_price.to_string(),
        "--stock".to_string(),
        stock.to_string(),
        "--minimum".to_string(),
        minimum.to_string(),
    ]
}

/// `chemical add`
pub fn chemical_usage(date: &str, chemical_id: i64, amount: f64, process: &str) -> Vec<String> {
    vec![
        "chemical".to_string(),
        "add".to_string(),
        "--date".to_string(),
        date.to_string(),
        "--chemical-id".to_string(),
        chemical_id.to_string(),
        "--amount".to_string(),
        amount.to_string(),
        "--process".to_string(),
        process.to_string(),
    ]
}
