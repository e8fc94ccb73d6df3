//! Plain-text run report

use crate::pipeline::RegionRun;
use chrono::{DateTime, Utc};
use forecast::Horizon;
use std::fmt::Write;

const RULE_WIDTH: usize = 80;
/// Forecast points shown per horizon in the detailed section
const DETAIL_POINTS: usize = 5;

fn reading(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.1}{}", v, unit),
        None => "n/a".to_string(),
    }
}

/// Render the human-readable report for one region run
pub fn render_text_report(run: &RegionRun, generated_at: DateTime<Utc>) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let thin = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "WEATHER PREDICTION SYSTEM - COMPREHENSIVE REPORT");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "Report Generated: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "Run ID: {}", run.run_id);
    let _ = writeln!(out, "Region: {} ({})", run.region.name_en, run.region.name);
    let _ = writeln!(out, "Level: {}", run.region.level.as_str());
    let _ = writeln!(
        out,
        "Coordinates: {:.2}°N, {:.2}°E",
        run.region.latitude, run.region.longitude
    );
    let method = run
        .predictions
        .method()
        .map(|m| m.as_str())
        .unwrap_or("none");
    let _ = writeln!(out, "Prediction Method: {}", method);
    let _ = writeln!(out);

    let _ = writeln!(out, "MULTI-SCALE PREDICTIONS");
    let _ = writeln!(out, "{}", thin);
    for result in &run.predictions.results {
        let _ = writeln!(
            out,
            "  {:<16} {} time points",
            result.horizon_description,
            result.predictions.len()
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "EXTREME WEATHER");
    let _ = writeln!(out, "{}", thin);
    let detections = &run.extreme_weather.detections;
    if detections.has_extreme() {
        for d in detections.detections() {
            let _ = writeln!(
                out,
                "  • {}: {} (Severity: {})",
                d.label, d.description, d.severity
            );
        }
    } else {
        let _ = writeln!(out, "  No extreme weather detected");
    }
    if let Some(analysis) = &run.extreme_weather.ai_analysis {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Analyst notes:");
        for line in analysis.lines() {
            let _ = writeln!(out, "    {}", line);
        }
    }
    let _ = writeln!(out);

    if let Some(short) = run.predictions.get(Horizon::SixHours) {
        let u = &short.uncertainty;
        let _ = writeln!(out, "UNCERTAINTY");
        let _ = writeln!(out, "{}", thin);
        let _ = writeln!(out, "  Method: {}", u.method);
        let _ = writeln!(out, "  Confidence: {:.0}%", u.confidence_level * 100.0);
        let _ = writeln!(out, "  Temperature: ±{:.2}°C", u.temperature_uncertainty);
        let _ = writeln!(out);
    }

    let status = match run.alert.bulletin() {
        Some(bulletin) => format!("Issued ({}, {})", bulletin.id, bulletin.level_name),
        None => "No Alert".to_string(),
    };
    let _ = writeln!(out, "Alert Status: {}", status);
    let _ = writeln!(out);

    let current = &run.current_weather;
    let _ = writeln!(out, "CURRENT WEATHER CONDITIONS");
    let _ = writeln!(out, "{}", thin);
    let _ = writeln!(
        out,
        "  Observed At: {}",
        current.timestamp.format("%Y-%m-%d %H:%M")
    );
    let _ = writeln!(out, "  Temperature: {}", reading(current.temperature, "°C"));
    let _ = writeln!(out, "  Humidity: {}", reading(current.humidity, "%"));
    let _ = writeln!(out, "  Pressure: {}", reading(current.pressure, " hPa"));
    let _ = writeln!(
        out,
        "  Wind: {} {}",
        current.wind_direction.map(|d| d.as_str()).unwrap_or("n/a"),
        reading(current.wind_speed, " m/s")
    );
    let _ = writeln!(
        out,
        "  Precipitation: {}",
        reading(current.precipitation, " mm/h")
    );
    let _ = writeln!(out, "  Visibility: {}", reading(current.visibility, " km"));
    let _ = writeln!(out, "  AQI: {}", reading(current.aqi, ""));
    let _ = writeln!(out);

    let _ = writeln!(out, "DETAILED FORECAST");
    let _ = writeln!(out, "{}", thin);
    for result in &run.predictions.results {
        let _ = writeln!(out, "[{}]", result.horizon_description);
        for p in result.predictions.iter().take(DETAIL_POINTS) {
            let _ = writeln!(out, "  {}", p.timestamp.format("%Y-%m-%d %H:%M"));
            let _ = writeln!(
                out,
                "    Temperature: {:.1}°C ({:.1} ~ {:.1})",
                p.temperature, p.temperature_min, p.temperature_max
            );
            let _ = writeln!(
                out,
                "    Humidity: {:.1}%  Pressure: {:.1} hPa",
                p.humidity, p.pressure
            );
            let _ = writeln!(
                out,
                "    Wind: {} {:.1} m/s (force {})",
                p.wind_direction.as_str(),
                p.wind_speed,
                p.wind_level
            );
            let _ = writeln!(
                out,
                "    Precipitation Chance: {:.0}%  Visibility: {:.1} km",
                p.precipitation_probability, p.visibility
            );
            let _ = writeln!(
                out,
                "    Air Quality: {} (AQI {})  Condition: {}",
                p.air_quality.label(),
                p.aqi,
                p.weather_condition.label()
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "END OF REPORT");
    let _ = writeln!(out, "{}", rule);
    out
}
