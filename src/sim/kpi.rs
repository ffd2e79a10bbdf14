//! Post-hoc KPI computation from committed tick records.

use std::fmt;

use serde::Serialize;

use crate::dispatch::{Improvement, OptimizationMetrics};

use super::types::TickRecord;

/// Cumulative figures for one heuristic over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HeuristicTotals {
    /// Sum of per-tick cost ($).
    pub total_cost: f64,
    /// Sum of per-tick curtailment (MWh).
    pub curtailment_mwh: f64,
    /// Sum of per-tick emissions (t CO2).
    pub emissions_t: f64,
    /// Mean efficiency across ticks (%).
    pub mean_efficiency_pct: f64,
    /// Mean synthetic compute time (ms).
    pub mean_compute_time_ms: f64,
}

impl HeuristicTotals {
    fn from_metrics<'a>(metrics: impl Iterator<Item = &'a OptimizationMetrics>) -> Self {
        let mut totals = Self::default();
        let mut n = 0_usize;
        for m in metrics {
            totals.total_cost += m.total_cost;
            totals.curtailment_mwh += m.curtailment_mwh;
            totals.emissions_t += m.emissions_t;
            totals.mean_efficiency_pct += m.efficiency_pct;
            totals.mean_compute_time_ms += m.compute_time_ms;
            n += 1;
        }
        if n > 0 {
            totals.mean_efficiency_pct /= n as f64;
            totals.mean_compute_time_ms /= n as f64;
        }
        totals
    }
}

/// Aggregate key performance indicators derived from a complete run.
///
/// Computed post-hoc from `&[TickRecord]` so reported figures always agree
/// with the exported per-tick data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunKpis {
    /// Number of committed ticks.
    pub ticks: usize,
    pub classical: HeuristicTotals,
    pub quantum: HeuristicTotals,
    /// Total cost savings of quantum-inspired over classical.
    pub cost_savings: Improvement,
    /// Total emissions reduction of quantum-inspired over classical.
    pub emissions_reduction: Improvement,
    /// Highest demand seen (MW).
    pub peak_demand_mw: f64,
    /// Renewable energy produced (MWh, sum of generation * dt).
    pub renewable_energy_mwh: f64,
    /// Storage energy throughput (MWh, sum of |flow|).
    pub storage_throughput_mwh: f64,
    /// Storage equivalent full cycles (throughput / 2*capacity).
    pub storage_equivalent_full_cycles: f64,
}

impl RunKpis {
    /// Computes all KPIs from the committed tick records.
    ///
    /// # Arguments
    ///
    /// * `records` - Committed ticks, in any order
    /// * `dt_hours` - Simulated hours per tick
    /// * `storage_capacity_mwh` - Storage capacity for cycle calculation
    pub fn from_records(records: &[TickRecord], dt_hours: f64, storage_capacity_mwh: f64) -> Self {
        let classical = HeuristicTotals::from_metrics(records.iter().map(|r| &r.classical));
        let quantum = HeuristicTotals::from_metrics(records.iter().map(|r| &r.quantum));

        let mut peak_demand = 0.0_f64;
        let mut renewable = 0.0_f64;
        let mut throughput = 0.0_f64;
        for r in records {
            peak_demand = peak_demand.max(r.demand_mw);
            renewable += r.total_generation_mw() * dt_hours;
            throughput += r.storage_flow_mwh.abs();
        }

        let cycles = if storage_capacity_mwh > 0.0 {
            throughput / (2.0 * storage_capacity_mwh)
        } else {
            0.0
        };

        Self {
            ticks: records.len(),
            cost_savings: Improvement::lower_is_better(classical.total_cost, quantum.total_cost),
            emissions_reduction: Improvement::lower_is_better(
                classical.emissions_t,
                quantum.emissions_t,
            ),
            classical,
            quantum,
            peak_demand_mw: peak_demand,
            renewable_energy_mwh: renewable,
            storage_throughput_mwh: throughput,
            storage_equivalent_full_cycles: cycles,
        }
    }
}

impl fmt::Display for RunKpis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ({} ticks) ---", self.ticks)?;
        writeln!(f, "                       classical    quantum-inspired")?;
        writeln!(
            f,
            "Total cost:            {:>11}  {:>11}",
            format!("${:.0}", self.classical.total_cost),
            format!("${:.0}", self.quantum.total_cost)
        )?;
        writeln!(
            f,
            "Curtailment:           {:>9.1} MWh {:>9.1} MWh",
            self.classical.curtailment_mwh, self.quantum.curtailment_mwh
        )?;
        writeln!(
            f,
            "Emissions:             {:>9.1} t   {:>9.1} t",
            self.classical.emissions_t, self.quantum.emissions_t
        )?;
        writeln!(
            f,
            "Mean efficiency:       {:>9.1} %   {:>9.1} %",
            self.classical.mean_efficiency_pct, self.quantum.mean_efficiency_pct
        )?;
        writeln!(
            f,
            "Mean compute time:     {:>9.1} ms  {:>9.1} ms",
            self.classical.mean_compute_time_ms, self.quantum.mean_compute_time_ms
        )?;
        writeln!(
            f,
            "Cost savings:          ${:.0} ({:+.1}%)",
            self.cost_savings.diff, self.cost_savings.percent
        )?;
        writeln!(
            f,
            "Emissions reduction:   {:.1} t ({:+.1}%)",
            self.emissions_reduction.diff, self.emissions_reduction.percent
        )?;
        writeln!(f, "Peak demand:           {:.1} MW", self.peak_demand_mw)?;
        writeln!(f, "Renewable energy:      {:.1} MWh", self.renewable_energy_mwh)?;
        write!(
            f,
            "Storage throughput:    {:.1} MWh ({:.2} equiv. cycles)",
            self.storage_throughput_mwh, self.storage_equivalent_full_cycles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(cost: f64, eff: f64, em: f64) -> OptimizationMetrics {
        OptimizationMetrics {
            total_cost: cost,
            curtailment_mwh: 1.0,
            efficiency_pct: eff,
            emissions_t: em,
            compute_time_ms: 10.0,
        }
    }

    fn make_record(demand: f64, flow: f64, classical_cost: f64, quantum_cost: f64) -> TickRecord {
        TickRecord {
            tick: 0,
            time_of_day: 12.0,
            solar_mw: 100.0,
            wind_mw: 50.0,
            demand_mw: demand,
            storage_charge_mwh: 100.0,
            storage_flow_mwh: flow,
            classical: metrics(classical_cost, 80.0, 4.0),
            quantum: metrics(quantum_cost, 90.0, 3.0),
        }
    }

    #[test]
    fn totals_and_means() {
        let records = vec![
            make_record(300.0, 10.0, 100.0, 80.0),
            make_record(350.0, -20.0, 300.0, 220.0),
        ];
        let kpi = RunKpis::from_records(&records, 0.2, 200.0);
        assert_eq!(kpi.ticks, 2);
        assert_eq!(kpi.classical.total_cost, 400.0);
        assert_eq!(kpi.quantum.total_cost, 300.0);
        assert_eq!(kpi.classical.curtailment_mwh, 2.0);
        assert_eq!(kpi.quantum.mean_efficiency_pct, 90.0);
        assert_eq!(kpi.cost_savings.diff, 100.0);
        assert_eq!(kpi.cost_savings.percent, 25.0);
        assert_eq!(kpi.emissions_reduction.diff, 2.0);
    }

    #[test]
    fn storage_throughput_and_cycles() {
        // flows: [10, -20, 30, -40] → throughput 100 MWh
        let records: Vec<TickRecord> = [10.0, -20.0, 30.0, -40.0]
            .iter()
            .map(|&f| make_record(300.0, f, 0.0, 0.0))
            .collect();
        let kpi = RunKpis::from_records(&records, 0.2, 50.0);
        assert!((kpi.storage_throughput_mwh - 100.0).abs() < 1e-9);
        assert!((kpi.storage_equivalent_full_cycles - 1.0).abs() < 1e-9);
    }

    #[test]
    fn peak_demand_and_renewables() {
        let records: Vec<TickRecord> = [300.0, 520.0, 410.0]
            .iter()
            .map(|&d| make_record(d, 0.0, 0.0, 0.0))
            .collect();
        let kpi = RunKpis::from_records(&records, 0.5, 200.0);
        assert_eq!(kpi.peak_demand_mw, 520.0);
        // 3 ticks × 150 MW × 0.5 h
        assert!((kpi.renewable_energy_mwh - 225.0).abs() < 1e-9);
    }

    #[test]
    fn empty_records() {
        let kpi = RunKpis::from_records(&[], 0.2, 200.0);
        assert_eq!(kpi.ticks, 0);
        assert_eq!(kpi.classical.mean_efficiency_pct, 0.0);
        assert_eq!(kpi.cost_savings.percent, 0.0);
        assert_eq!(kpi.storage_equivalent_full_cycles, 0.0);
    }

    #[test]
    fn display_does_not_panic() {
        let kpi = RunKpis::from_records(&[make_record(300.0, 5.0, 10.0, 8.0)], 0.2, 200.0);
        assert!(format!("{kpi}").contains("KPI Report"));
    }
}
