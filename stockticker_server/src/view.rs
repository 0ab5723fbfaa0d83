//! HTML rendering of the stock view model.

use stockticker_lib::types::DayData;
use stockticker_lib::StockView;

/// One table row of the stock page.
#[derive(Clone, Debug, PartialEq)]
pub struct DayRow {
    pub date: String,
    pub close: String,
}

pub fn build_day_rows(daily_data: &[DayData]) -> Vec<DayRow> {
    daily_data
        .iter()
        .map(|d| DayRow {
            date: d.date.format("%Y-%m-%d").to_string(),
            close: format_price(d.close),
        })
        .collect()
}

pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

/// Mean close for display; an empty window has no average.
pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(avg) => format_price(avg),
        None => "n/a".to_string(),
    }
}

/// Renders the stock page for `symbol`.
pub fn render_stock(symbol: &str, view: &StockView) -> String {
    let symbol = escape_html(symbol);
    let mut rows = String::new();
    for row in build_day_rows(&view.daily_data) {
        rows.push_str(&format!(
            "      <tr><td>{}</td><td>{}</td></tr>\n",
            row.date, row.close
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{symbol}</title>
</head>
<body>
  <h1>{symbol}</h1>
  <p>Days requested: {requested}</p>
  <p>Days returned: {returned}</p>
  <p>Average close: <strong>{average}</strong></p>
  <table>
    <thead>
      <tr><th>Date</th><th>Close</th></tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
</body>
</html>
"#,
        symbol = symbol,
        requested = view.days_requested,
        returned = view.days_returned,
        average = format_average(view.average_close),
        rows = rows,
    )
}

/// Generic failure page. Carries no detail about the underlying error.
pub fn render_error() -> String {
    r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Error</title>
</head>
<body>
  <h1>Something went wrong</h1>
  <p>Stock data is unavailable right now. Please try again later.</p>
</body>
</html>
"#
    .to_string()
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
