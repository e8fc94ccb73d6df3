//! Prompt construction

use crate::analyst::AnalysisKind;
use crate::LlmError;
use forecast::Horizon;
use hazard::HazardThresholds;
use weather_model::WeatherObservation;

/// Number of trailing history records included in a prediction prompt
pub const HISTORY_WINDOW: usize = 10;

pub fn prediction_prompt(
    history: &[WeatherObservation],
    horizon: Horizon,
) -> Result<String, LlmError> {
    let recent = &history[history.len().saturating_sub(HISTORY_WINDOW)..];
    let records = serde_json::to_string_pretty(recent)?;
    Ok(format!(
        "Based on the following historical weather data, forecast the weather for the {}.\n\n\
         Historical data (most recent {} records):\n{}\n\n\
         Provide:\n\
         1. Temperature range\n\
         2. Precipitation probability\n\
         3. Wind force and direction\n\
         4. Weather phenomena\n\
         5. Confidence\n\n\
         Return the forecast as JSON.",
        horizon.description(),
        recent.len(),
        records
    ))
}

pub fn extreme_weather_prompt(
    observation: &WeatherObservation,
    thresholds: &HazardThresholds,
) -> Result<String, LlmError> {
    Ok(format!(
        "Analyze the following weather data and identify any extreme weather events \
         (typhoon, heavy rain, high temperature, low temperature, heavy snow).\n\n\
         Weather data:\n{}\n\n\
         Extreme weather thresholds:\n{}\n\n\
         Return JSON with:\n\
         1. is_extreme: whether the weather is extreme (true/false)\n\
         2. event_type: the extreme weather type\n\
         3. severity: severity level (1-4)\n\
         4. description: detailed description\n\
         5. suggestions: recommended actions",
        serde_json::to_string_pretty(observation)?,
        serde_json::to_string_pretty(thresholds)?
    ))
}

pub fn analysis_prompt(
    observation: &WeatherObservation,
    kind: AnalysisKind,
) -> Result<String, LlmError> {
    let focus = match kind {
        AnalysisKind::General => {
            "Provide:\n\
             1. A summary of current conditions\n\
             2. The main weather features\n\
             3. Expected near-term trend\n\
             4. Advice and precautions"
        }
        AnalysisKind::Extreme => {
            "Focus on:\n\
             1. Whether there is extreme weather risk\n\
             2. Extreme weather type and intensity\n\
             3. Affected area and duration\n\
             4. Recommended precautions"
        }
        AnalysisKind::Trend => {
            "Analyze the trend of:\n\
             1. Temperature\n\
             2. Precipitation probability\n\
             3. Wind force\n\
             4. Overall weather evolution"
        }
    };

    Ok(format!(
        "Analyze the following weather data:\n{}\n\n{}",
        serde_json::to_string_pretty(observation)?,
        focus
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazard::THRESHOLDS;

    fn history(n: usize) -> Vec<WeatherObservation> {
        (0..n)
            .map(|i| WeatherObservation::default().with_temperature(i as f64))
            .collect()
    }

    #[test]
    fn test_prediction_prompt_keeps_last_ten() {
        let prompt = prediction_prompt(&history(25), Horizon::SixHours).unwrap();
        assert!(prompt.contains("next 6 hours"));
        assert!(prompt.contains("most recent 10 records"));
        assert!(prompt.contains("24.0"));
        assert!(!prompt.contains("\"temperature\": 14.0"));
    }

    #[test]
    fn test_short_history() {
        let prompt = prediction_prompt(&history(3), Horizon::OneDay).unwrap();
        assert!(prompt.contains("most recent 3 records"));
    }

    #[test]
    fn test_extreme_prompt_carries_thresholds() {
        let obs = WeatherObservation::default().with_wind_speed(40.0);
        let prompt = extreme_weather_prompt(&obs, &THRESHOLDS).unwrap();
        assert!(prompt.contains("32.7"));
        assert!(prompt.contains("is_extreme"));
    }

    #[test]
    fn test_analysis_focus_differs_by_kind() {
        let obs = WeatherObservation::default();
        let general = analysis_prompt(&obs, AnalysisKind::General).unwrap();
        let trend = analysis_prompt(&obs, AnalysisKind::Trend).unwrap();
        assert!(general.contains("summary of current conditions"));
        assert!(trend.contains("Overall weather evolution"));
    }
}
