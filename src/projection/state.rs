//! Account state advanced month by month during a projection
//!
//! Both engines share this single update rule; the deterministic engine
//! feeds it a flat monthly rate, the Monte Carlo engine a rate re-sampled
//! at the start of each simulated year.

/// Balance and cumulative contributions of one account under projection
#[derive(Debug, Clone, Default)]
pub struct AccountState {
    /// Current balance
    pub balance: f64,

    /// Contributions credited so far, net of loading fees
    pub total_contributions: f64,
}

impl AccountState {
    /// Fresh account with no balance
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the account by one month.
    ///
    /// All fee and rate arguments are decimals (0.01 = 1%). Order matters:
    /// loading fee on the contribution, contribution credited, admin fee on
    /// the balance before growth (annual fee pro-rata over 12 months), then
    /// compounding at `monthly_rate`.
    pub fn apply_month(
        &mut self,
        contribution: f64,
        loading_fee: f64,
        admin_fee: f64,
        monthly_rate: f64,
    ) {
        let net_contribution = contribution * (1.0 - loading_fee);
        self.balance += net_contribution;
        self.total_contributions += net_contribution;
        self.balance *= 1.0 - admin_fee / 12.0;
        self.balance *= 1.0 + monthly_rate;
    }

    /// Accumulated gain over net contributions
    pub fn total_return(&self) -> f64 {
        self.balance - self.total_contributions
    }
}
