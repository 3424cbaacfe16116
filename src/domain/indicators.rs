//! The fixed indicator catalog.
//!
//! Each entry points at a World Bank bulk export (`API_<code>_DS2_...csv`).

use crate::domain::types::{IndicatorDescriptor, Rgb, ValueFormat};

pub static CATALOG: [IndicatorDescriptor; 7] = [
    IndicatorDescriptor {
        id: "gdp",
        code: "NY.GDP.MKTP.CD",
        name: "GDP",
        title: "Gross Domestic Product",
        subtitle: "Current US$",
        color: Rgb(233, 30, 99),
        format: ValueFormat::LargeNumber,
        file_name: "API_NY.GDP.MKTP.CD_DS2_en_csv_v2_322200.csv",
    },
    IndicatorDescriptor {
        id: "gdp-growth",
        code: "NY.GDP.MKTP.KD.ZG",
        name: "GDP Growth",
        title: "GDP Growth Rate",
        subtitle: "Annual %",
        color: Rgb(240, 98, 146),
        format: ValueFormat::Percent { decimals: 2 },
        file_name: "API_NY.GDP.MKTP.KD.ZG_DS2_en_csv_v2_322193.csv",
    },
    IndicatorDescriptor {
        id: "inflation",
        code: "FP.CPI.TOTL.ZG",
        name: "Inflation",
        title: "Inflation Rate",
        subtitle: "Consumer prices, annual %",
        color: Rgb(236, 64, 122),
        format: ValueFormat::Percent { decimals: 2 },
        file_name: "API_FP.CPI.TOTL.ZG_DS2_en_csv_v2_322058.csv",
    },
    IndicatorDescriptor {
        id: "unemployment",
        code: "SL.UEM.TOTL.ZS",
        name: "Unemployment",
        title: "Unemployment Rate",
        subtitle: "% of total labor force",
        color: Rgb(216, 27, 96),
        format: ValueFormat::Percent { decimals: 2 },
        file_name: "API_SL.UEM.TOTL.ZS_DS2_en_csv_v2_322167.csv",
    },
    IndicatorDescriptor {
        id: "life-expectancy",
        code: "SP.DYN.LE00.IN",
        name: "Life Expectancy",
        title: "Life Expectancy at Birth",
        subtitle: "Years",
        color: Rgb(255, 64, 129),
        format: ValueFormat::Unit {
            decimals: 1,
            suffix: " years",
        },
        file_name: "API_SP.DYN.LE00.IN_DS2_en_csv_v2_321761.csv",
    },
    IndicatorDescriptor {
        id: "population",
        code: "SP.POP.TOTL",
        name: "Population",
        title: "Total Population",
        subtitle: "Number of people",
        color: Rgb(244, 143, 177),
        format: ValueFormat::LargeNumber,
        file_name: "API_SP.POP.TOTL_DS2_en_csv_v2_322199.csv",
    },
    IndicatorDescriptor {
        id: "exchange-rate",
        code: "PA.NUS.FCRF",
        name: "Exchange Rate",
        title: "Official Exchange Rate",
        subtitle: "LCU per US$, period average",
        color: Rgb(173, 20, 87),
        format: ValueFormat::Unit {
            decimals: 2,
            suffix: " LCU/US$",
        },
        file_name: "API_PA.NUS.FCRF_DS2_en_csv_v2_2844.csv",
    },
];

/// Look up an indicator by slug, code, or display name (case-insensitive).
pub fn find_indicator(key: &str) -> Option<&'static IndicatorDescriptor> {
    let key = key.trim();
    CATALOG.iter().find(|d| {
        d.id.eq_ignore_ascii_case(key)
            || d.code.eq_ignore_ascii_case(key)
            || d.name.eq_ignore_ascii_case(key)
    })
}

/// Resolve a list of user-supplied keys; an empty list selects the whole catalog.
pub fn resolve_indicators(keys: &[String]) -> Result<Vec<&'static IndicatorDescriptor>, String> {
    if keys.is_empty() {
        return Ok(CATALOG.iter().collect());
    }

    let mut out: Vec<&'static IndicatorDescriptor> = Vec::with_capacity(keys.len());
    for key in keys {
        let descriptor = find_indicator(key).ok_or_else(|| {
            let known: Vec<&str> = CATALOG.iter().map(|d| d.id).collect();
            format!("Unknown indicator '{key}'. Known: {}", known.join(", "))
        })?;
        if !out.iter().any(|d| d.id == descriptor.id) {
            out.push(descriptor);
        }
    }
    Ok(out)
}
