//! Per-category field catalogs for the provider's document shapes.
//!
//! Each catalog declares the device states one data category produces: the
//! key path into the raw document, the expected type, the quantity family
//! for unit conversion, and any derivation. State names match the device
//! states the host environment exposes (`temp`, `windGust`, `d1_high`, …).
//!
//! Raw paths point at the imperial copies; the pipeline converts to the
//! configured unit system.

use wxstate_core::{NormalizedValue, QuantityFamily};
use wxstate_extract::{Derivation, FieldSpec, TargetType};

/// Current personal-weather-station observation states.
#[must_use]
pub fn current_conditions() -> Vec<FieldSpec> {
    let obs = "observations.0";
    let imp = "observations.0.imperial";
    vec![
        FieldSpec::new("stationID", &format!("{obs}.stationID"), TargetType::Text),
        FieldSpec::new(
            "currentObservation",
            &format!("{obs}.obsTimeLocal"),
            TargetType::Text,
        ),
        FieldSpec::new(
            "currentObservationEpoch",
            &format!("{obs}.epoch"),
            TargetType::Integer,
        ),
        FieldSpec::new("neighborhood", &format!("{obs}.neighborhood"), TargetType::Text),
        FieldSpec::new("temp", &format!("{imp}.temp"), TargetType::Float)
            .family(QuantityFamily::Temperature),
        FieldSpec::new("tempIcon", &format!("{imp}.temp"), TargetType::Float)
            .family(QuantityFamily::Temperature)
            .derive(Derivation::IconBucket),
        FieldSpec::new("dewpoint", &format!("{imp}.dewpt"), TargetType::Float)
            .family(QuantityFamily::Temperature),
        FieldSpec::new("heatIndex", &format!("{imp}.heatIndex"), TargetType::Float)
            .family(QuantityFamily::Temperature),
        FieldSpec::new("windchill", &format!("{imp}.windChill"), TargetType::Float)
            .family(QuantityFamily::Temperature),
        FieldSpec::new("pressure", &format!("{imp}.pressure"), TargetType::Float)
            .family(QuantityFamily::Pressure),
        FieldSpec::new("pressureIcon", &format!("{imp}.pressure"), TargetType::Float)
            .family(QuantityFamily::Pressure)
            .derive(Derivation::IconBucket),
        // Precipitation has a floor of zero, so a corrupt reading stores 0
        // rather than blocking rain-total triggers.
        FieldSpec::new("precipRate", &format!("{imp}.precipRate"), TargetType::Float)
            .family(QuantityFamily::Precipitation)
            .default_value(NormalizedValue::Float(0.0)),
        FieldSpec::new("precipToday", &format!("{imp}.precipTotal"), TargetType::Float)
            .family(QuantityFamily::Precipitation)
            .default_value(NormalizedValue::Float(0.0)),
        FieldSpec::new("relativeHumidity", &format!("{obs}.humidity"), TargetType::Float)
            .percentage(),
        FieldSpec::new("uv", &format!("{obs}.uv"), TargetType::Float),
        FieldSpec::new(
            "solarRadiation",
            &format!("{obs}.solarRadiation"),
            TargetType::Float,
        ),
        FieldSpec::new("windDegrees", &format!("{obs}.winddir"), TargetType::Integer),
        FieldSpec::new("windSpeed", &format!("{imp}.windSpeed"), TargetType::Float)
            .family(QuantityFamily::Speed),
        FieldSpec::new("windSpeedIcon", &format!("{imp}.windSpeed"), TargetType::Float)
            .family(QuantityFamily::Speed)
            .derive(Derivation::IconBucket),
        FieldSpec::new("windGust", &format!("{imp}.windGust"), TargetType::Float)
            .family(QuantityFamily::Speed),
        FieldSpec::new("windGustIcon", &format!("{imp}.windGust"), TargetType::Float)
            .family(QuantityFamily::Speed)
            .derive(Derivation::IconBucket),
        FieldSpec::new("elevation", &format!("{imp}.elev"), TargetType::Float),
    ]
}

/// States for one day of the ten-day forecast, 1-based.
#[must_use]
pub fn forecast_day(day: usize) -> Vec<FieldSpec> {
    let idx = day.saturating_sub(1);
    let base = format!("forecast.simpleforecast.forecastday.{idx}");
    vec![
        FieldSpec::new(
            &format!("d{day}_conditions"),
            &format!("{base}.conditions"),
            TargetType::Text,
        ),
        FieldSpec::new(
            &format!("d{day}_high"),
            &format!("{base}.high.fahrenheit"),
            TargetType::Float,
        )
        .family(QuantityFamily::Temperature),
        FieldSpec::new(
            &format!("d{day}_low"),
            &format!("{base}.low.fahrenheit"),
            TargetType::Float,
        )
        .family(QuantityFamily::Temperature),
        FieldSpec::new(&format!("d{day}_pop"), &format!("{base}.pop"), TargetType::Float)
            .percentage(),
        FieldSpec::new(
            &format!("d{day}_qpf"),
            &format!("{base}.qpf_allday.in"),
            TargetType::Float,
        )
        .family(QuantityFamily::Precipitation)
        .default_value(NormalizedValue::Float(0.0)),
        FieldSpec::new(
            &format!("d{day}_snow"),
            &format!("{base}.snow_allday.in"),
            TargetType::Float,
        )
        .family(QuantityFamily::Precipitation)
        .default_value(NormalizedValue::Float(0.0)),
        FieldSpec::new(
            &format!("d{day}_windSpeed"),
            &format!("{base}.avewind.mph"),
            TargetType::Float,
        )
        .family(QuantityFamily::Speed),
        FieldSpec::new(
            &format!("d{day}_windDir"),
            &format!("{base}.avewind.dir"),
            TargetType::Text,
        ),
        FieldSpec::new(
            &format!("d{day}_windDirLong"),
            &format!("{base}.avewind.dir"),
            TargetType::Text,
        )
        .derive(Derivation::WindDirectionLong),
        FieldSpec::new(&format!("d{day}_icon"), &format!("{base}.icon"), TargetType::Text),
    ]
}

/// All ten forecast days.
#[must_use]
pub fn ten_day_forecast() -> Vec<FieldSpec> {
    (1..=10).flat_map(forecast_day).collect()
}

/// States for one hour of the hourly forecast, 1-based.
#[must_use]
pub fn hourly_forecast_hour(hour: usize) -> Vec<FieldSpec> {
    let idx = hour.saturating_sub(1);
    let base = format!("hourly_forecast.{idx}");
    vec![
        FieldSpec::new(
            &format!("h{hour}_time"),
            &format!("{base}.FCTTIME.civil"),
            TargetType::Text,
        ),
        FieldSpec::new(
            &format!("h{hour}_temp"),
            &format!("{base}.temp.english"),
            TargetType::Float,
        )
        .family(QuantityFamily::Temperature),
        FieldSpec::new(
            &format!("h{hour}_condition"),
            &format!("{base}.condition"),
            TargetType::Text,
        ),
        FieldSpec::new(&format!("h{hour}_pop"), &format!("{base}.pop"), TargetType::Float)
            .percentage(),
        FieldSpec::new(
            &format!("h{hour}_humidity"),
            &format!("{base}.humidity"),
            TargetType::Float,
        )
        .percentage(),
        FieldSpec::new(
            &format!("h{hour}_precip"),
            &format!("{base}.qpf.english"),
            TargetType::Float,
        )
        .family(QuantityFamily::Precipitation)
        .default_value(NormalizedValue::Float(0.0)),
        FieldSpec::new(
            &format!("h{hour}_windSpeed"),
            &format!("{base}.wspd.english"),
            TargetType::Float,
        )
        .family(QuantityFamily::Speed),
        FieldSpec::new(
            &format!("h{hour}_windDirLong"),
            &format!("{base}.wdir.dir"),
            TargetType::Text,
        )
        .derive(Derivation::WindDirectionLong),
    ]
}

/// The first twenty-four hourly forecast entries.
#[must_use]
pub fn hourly_forecast() -> Vec<FieldSpec> {
    (1..=24).flat_map(hourly_forecast_hour).collect()
}

/// Almanac (normal and record temperature) states.
#[must_use]
pub fn almanac() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("airportCode", "almanac.airport_code", TargetType::Text),
        FieldSpec::new("tempHighNormal", "almanac.temp_high.normal.F", TargetType::Float)
            .family(QuantityFamily::Temperature),
        FieldSpec::new("tempHighRecord", "almanac.temp_high.record.F", TargetType::Float)
            .family(QuantityFamily::Temperature),
        FieldSpec::new(
            "tempHighRecordYear",
            "almanac.temp_high.recordyear",
            TargetType::Integer,
        ),
        FieldSpec::new("tempLowNormal", "almanac.temp_low.normal.F", TargetType::Float)
            .family(QuantityFamily::Temperature),
        FieldSpec::new("tempLowRecord", "almanac.temp_low.record.F", TargetType::Float)
            .family(QuantityFamily::Temperature),
        FieldSpec::new(
            "tempLowRecordYear",
            "almanac.temp_low.recordyear",
            TargetType::Integer,
        ),
    ]
}

/// Astronomy (moon phase, sunrise/sunset) states.
#[must_use]
pub fn astronomy() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("moonPhase", "moon_phase.percentIlluminated", TargetType::Float)
            .percentage(),
        FieldSpec::new("moonAge", "moon_phase.ageOfMoon", TargetType::Integer),
        FieldSpec::new("phaseOfMoon", "moon_phase.phaseofMoon", TargetType::Text),
        FieldSpec::new("sunriseHour", "moon_phase.sunrise.hour", TargetType::Integer),
        FieldSpec::new("sunriseMinute", "moon_phase.sunrise.minute", TargetType::Integer),
        FieldSpec::new("sunsetHour", "moon_phase.sunset.hour", TargetType::Integer),
        FieldSpec::new("sunsetMinute", "moon_phase.sunset.minute", TargetType::Integer),
    ]
}

/// Tide site and the first four tide summary entries.
#[must_use]
pub fn tide() -> Vec<FieldSpec> {
    let mut specs = vec![
        FieldSpec::new("tideSite", "tide.tideInfo.0.tideSite", TargetType::Text),
        FieldSpec::new("tideMaxHeight", "tide.tideSummaryStats.0.maxheight", TargetType::Float),
        FieldSpec::new("tideMinHeight", "tide.tideSummaryStats.0.minheight", TargetType::Float),
    ];
    for n in 1..=4usize {
        let idx = n - 1;
        specs.push(FieldSpec::new(
            &format!("t{n}_type"),
            &format!("tide.tideSummary.{idx}.data.type"),
            TargetType::Text,
        ));
        specs.push(FieldSpec::new(
            &format!("t{n}_height"),
            &format!("tide.tideSummary.{idx}.data.height"),
            TargetType::Text,
        ));
        specs.push(FieldSpec::new(
            &format!("t{n}_time"),
            &format!("tide.tideSummary.{idx}.date.pretty"),
            TargetType::Text,
        ));
    }
    specs
}
