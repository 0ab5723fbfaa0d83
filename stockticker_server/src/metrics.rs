//! Prometheus text exposition of the controller counters.

use stockticker_lib::{MetricsSnapshot, OperationSnapshot};

const PREFIX: &str = "stockticker_stock_controller";

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

struct Family {
    name: &'static str,
    kind: &'static str,
    help: &'static str,
    value: fn(&OperationSnapshot) -> String,
}

const FAMILIES: [Family; 3] = [
    Family {
        name: "calls_total",
        kind: "counter",
        help: "Number of calls made.",
        value: |s| s.calls.to_string(),
    },
    Family {
        name: "errors_total",
        kind: "counter",
        help: "Number of calls that failed.",
        value: |s| s.errors.to_string(),
    },
    Family {
        name: "duration_seconds_sum",
        kind: "counter",
        help: "Total time spent in calls.",
        value: |s| format!("{:.6}", s.duration_seconds),
    },
];

pub fn render(snapshot: &MetricsSnapshot) -> String {
    let mut out = String::new();
    render_group(
        &mut out,
        "client",
        "resolution",
        &[("daily", &snapshot.client_daily)],
    );
    render_group(
        &mut out,
        "cache",
        "operation",
        &[("read", &snapshot.cache_read), ("write", &snapshot.cache_write)],
    );
    out
}

fn render_group(
    out: &mut String,
    subsystem: &str,
    label: &str,
    series: &[(&str, &OperationSnapshot)],
) {
    for family in &FAMILIES {
        let metric = format!("{}_{}_{}", PREFIX, subsystem, family.name);
        out.push_str(&format!("# HELP {} {}\n", metric, family.help));
        out.push_str(&format!("# TYPE {} {}\n", metric, family.kind));
        for (value, stats) in series {
            out.push_str(&format!(
                "{}{{{}=\"{}\"}} {}\n",
                metric,
                label,
                value,
                (family.value)(stats)
            ));
        }
    }
}
