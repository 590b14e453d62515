/// Series derived from one solver case. Every vector runs over the case's
/// vertical levels, except the combined series which run down then up.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaseSeries {
    pub pressure: Vec<f64>,
    pub heating_rate_shortwave: Vec<f64>,
    pub heating_rate_longwave: Vec<f64>,
    pub optical_thickness_downward: Vec<f64>,
    pub optical_thickness_upward: Vec<f64>,
    pub optical_depth_downward: Vec<f64>,
    pub optical_depth_upward: Vec<f64>,
    pub optical_depth: Vec<f64>,
    pub optical_thickness: Vec<f64>,
}

/// Aggregate over all cases, aligned with the input `mu0` order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchResult {
    pub mu0: Vec<f64>,
    pub mu0_dash: Vec<f64>,
    pub cases: Vec<CaseSeries>,
}

impl BatchResult {
    pub fn with_capacity(case_count: usize) -> Self {
        Self {
            mu0: Vec::with_capacity(case_count),
            mu0_dash: Vec::with_capacity(case_count),
            cases: Vec::with_capacity(case_count),
        }
    }

    pub fn push_case(&mut self, mu0: f64, mu0_dash: f64, series: CaseSeries) {
        self.mu0.push(mu0);
        self.mu0_dash.push(mu0_dash);
        self.cases.push(series);
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Collects one per-case series across the batch.
    pub fn collect<F>(&self, select: F) -> Vec<Vec<f64>>
    where
        F: Fn(&CaseSeries) -> &Vec<f64>,
    {
        self.cases.iter().map(|case| select(case).clone()).collect()
    }
}
