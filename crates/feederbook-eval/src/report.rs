use crate::metrics::{EnergyBalance, MetricsReport, SlaMetrics};

/// Render a deterministic markdown report from energy-balance metrics.
pub fn render_report(metrics: &MetricsReport) -> String {
    let mut lines = Vec::new();

    lines.push("# Feeder Energy Balance Report".to_string());
    lines.push(String::new());
    lines.push("## Summary".to_string());
    if let Some(source) = &metrics.source {
        lines.push(format!("- source: {source}"));
    }
    lines.push(format!("- regions: {}", metrics.regions.len()));
    lines.push(format!("- feeders: {}", metrics.counts.feeders));
    lines.push(format!("- dts: {}", metrics.counts.dts));
    lines.push(format!("- meters: {}", metrics.counts.meters));
    push_balance(&mut lines, &metrics.balance);
    push_sla(&mut lines, &metrics.sla);
    lines.push(String::new());

    lines.push("## Regions".to_string());
    lines.push(
        "| region | feeders | dts | meters | loss_feeder_dt | loss_dt_consumer | loss_feeder_consumer | sla_daily | sla_load |"
            .to_string(),
    );
    lines.push("| --- | --- | --- | --- | --- | --- | --- | --- | --- |".to_string());
    for region in &metrics.regions {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} | {} ({}) | {} | {} |",
            region.name,
            region.counts.feeders,
            region.counts.dts,
            region.counts.meters,
            fmt_pct(region.balance.loss_feeder_dt_pct),
            fmt_pct(region.balance.loss_dt_consumer_pct),
            fmt_pct(region.balance.loss_feeder_consumer_pct),
            region.loss_band.label(),
            fmt_pct(region.sla.daily_energy_pct),
            fmt_pct(region.sla.load_data_pct),
        ));
    }
    lines.push(String::new());

    lines.push("## Feeders".to_string());
    lines.push(
        "| feeder | region | feeder_energy | dt_energy | consumer_energy | loss_feeder_dt | loss_feeder_consumer |"
            .to_string(),
    );
    lines.push("| --- | --- | --- | --- | --- | --- | --- |".to_string());
    for region in &metrics.regions {
        for feeder in &region.feeders {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} | {} ({}) |",
                feeder.code,
                region.name,
                feeder.balance.feeder_energy,
                feeder.balance.dt_energy,
                feeder.balance.consumer_energy,
                fmt_pct(feeder.balance.loss_feeder_dt_pct),
                fmt_pct(feeder.balance.loss_feeder_consumer_pct),
                feeder.loss_band.label(),
            ));
        }
    }
    lines.push(String::new());

    lines.push("## Distribution transformers".to_string());
    lines.push("| dt | feeder | meters | dt_energy | consumer_energy | loss_dt_consumer |".to_string());
    lines.push("| --- | --- | --- | --- | --- | --- |".to_string());
    for feeder in metrics.regions.iter().flat_map(|r| r.feeders.iter()) {
        for dt in &feeder.dts {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} ({}) |",
                dt.code,
                feeder.code,
                dt.meters,
                dt.dt_energy,
                dt.consumer_energy,
                fmt_pct(dt.loss_dt_consumer_pct),
                dt.loss_band.label(),
            ));
        }
    }

    lines.join("\n")
}

fn push_balance(lines: &mut Vec<String>, balance: &EnergyBalance) {
    lines.push(format!("- feeder energy: {}", balance.feeder_energy));
    lines.push(format!("- dt energy: {}", balance.dt_energy));
    lines.push(format!("- consumer energy: {}", balance.consumer_energy));
    lines.push(format!("- loss feeder→dt: {}", fmt_pct(balance.loss_feeder_dt_pct)));
    lines.push(format!(
        "- loss dt→consumer: {}",
        fmt_pct(balance.loss_dt_consumer_pct)
    ));
    lines.push(format!(
        "- loss feeder→consumer: {}",
        fmt_pct(balance.loss_feeder_consumer_pct)
    ));
}

fn push_sla(lines: &mut Vec<String>, sla: &SlaMetrics) {
    lines.push(format!(
        "- sla daily energy: {} ({})",
        fmt_pct(sla.daily_energy_pct),
        sla.daily_energy_band.label()
    ));
    lines.push(format!(
        "- sla load data: {} ({})",
        fmt_pct(sla.load_data_pct),
        sla.load_data_band.label()
    ));
}

fn fmt_pct(value: f64) -> String {
    format!("{value:.2}%")
}
