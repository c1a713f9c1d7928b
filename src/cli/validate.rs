//! Validate command implementation

use super::PolicyArgs;
use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub policy: PolicyArgs,
}

impl ValidateArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let policy = super::backtest::validated_policy(&self.policy, config)?;

        println!("Staking policy OK");
        println!("  Base amount:     {}", policy.base_amount());
        println!("  Sequence:        {}", policy.sequence_label());
        println!("  Stop-loss:       {}", policy.stop_loss_count());
        println!("  Odds:            {}", policy.odds());
        println!("  Start omission:  {}", policy.start_omission());
        println!("  Test periods:    {}", policy.test_periods());
        match policy.max_cycle_exposure() {
            Some(exposure) => println!("  Max cycle loss:  {}", exposure),
            None => println!("  Max cycle loss:  exceeds decimal range"),
        }
        if policy.holds_last_multiplier() {
            println!(
                "  Note: cycles longer than {} bets repeat the last multiplier",
                policy.betting_sequence().len()
            );
        }

        Ok(())
    }
}
