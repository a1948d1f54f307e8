use num_bigint::BigUint;
use num_traits::Zero;

use crate::server::model::{
    balance::{reading_meets, BalanceReading, UnknownBalancePolicy},
    reconciliation::Eligibility,
};

use super::{tenant::TenantTarget, traits::BalanceOracle};

/// Checks the addresses in order and stops at the first one holding the threshold.
///
/// Balances are never summed across addresses. An empty list is ineligible without any
/// oracle query. With `UnknownBalancePolicy::Skip`, a failed reading turns an otherwise
/// ineligible result into `Unknown`.
pub async fn evaluate(
    oracle: &dyn BalanceOracle,
    addresses: &[String],
    target: &TenantTarget,
    policy: UnknownBalancePolicy,
) -> Eligibility {
    let mut saw_unknown = false;

    for address in addresses {
        let reading = match oracle
            .get_balance(address, &target.token_mint, &target.rpc_url)
            .await
        {
            BalanceReading::Unknown if policy == UnknownBalancePolicy::TreatAsZero => {
                BalanceReading::Known(BigUint::zero())
            }
            reading => reading,
        };

        if reading_meets(&reading, &target.required) {
            return Eligibility::Eligible;
        }

        if reading == BalanceReading::Unknown {
            tracing::debug!(
                tenant_id = target.tenant_id,
                address = %address,
                "Balance unknown for address"
            );
            saw_unknown = true;
        }
    }

    if saw_unknown {
        Eligibility::Unknown
    } else {
        Eligibility::Ineligible
    }
}
