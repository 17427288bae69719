use scraper::{ElementRef, Html, Selector};
use tracing::error;

const TEMPERATURE_TABLE_SELECTOR: &str = "dl.tourlogger-description-list";
const TODAY_LABEL: &str = "Heute";

/// Extracts today's water temperature from the fetched page.
///
/// The page embeds a multi-day forecast as a definition list of parallel
/// `dt` (day label) and `dd` (value) nodes. The value for a label sits at the
/// same position in the `dd` sequence, and the position of the "Heute" label
/// shifts from day to day, so the index is discovered first and then applied
/// to the value sequence. Every structural miss logs and yields `None`.
pub fn extract_today_temperature(html: &str) -> Option<f64> {
    let document = Html::parse_document(html);

    // Static selectors; parse can only fail on a malformed literal.
    let table_selector = Selector::parse(TEMPERATURE_TABLE_SELECTOR).ok()?;
    let label_selector = Selector::parse("dt").ok()?;
    let value_selector = Selector::parse("dd").ok()?;

    let Some(table) = document.select(&table_selector).next() else {
        error!("temperature table not found in page");
        return None;
    };

    let labels: Vec<String> = table.select(&label_selector).map(element_text).collect();
    if labels.len() < 2 {
        error!(labels = labels.len(), "expected at least two day labels");
        return None;
    }

    let Some(today_index) = labels.iter().position(|label| label.contains(TODAY_LABEL)) else {
        error!("no day label containing `{}` found", TODAY_LABEL);
        return None;
    };

    let values: Vec<String> = table.select(&value_selector).map(element_text).collect();
    if values.len() < today_index + 1 {
        error!(
            values = values.len(),
            today_index, "day values misaligned with labels"
        );
        return None;
    }

    let raw = &values[today_index];
    let Some(token) = raw.split_whitespace().next() else {
        error!("value for today's label is empty");
        return None;
    };

    match token.parse::<f64>() {
        Ok(temperature) if temperature.is_finite() => Some(temperature),
        Ok(_) => {
            error!(token = %token, "parsed temperature is not a finite number");
            None
        }
        Err(err) => {
            error!(token = %token, error = %err, "value for today's label is not numeric");
            None
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
