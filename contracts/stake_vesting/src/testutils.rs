//! Test fixtures: a registry double and an initialised ledger with a minted token.

use incentive_common::{Capability, CapabilityRegistry};
use soroban_sdk::{
    contract, contractimpl, contracttype,
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::{StakeVesting, StakeVestingClient, StakingConfig};

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Grant(Address, Capability),
}

#[contract]
pub struct MockRegistry;

#[contractimpl]
impl MockRegistry {
    pub fn grant(env: Env, account: Address, capability: Capability) {
        env.storage()
            .persistent()
            .set(&MockKey::Grant(account, capability), &true);
    }
}

#[contractimpl]
impl CapabilityRegistry for MockRegistry {
    fn has_role(env: Env, account: Address, capability: Capability) -> bool {
        env.storage()
            .persistent()
            .has(&MockKey::Grant(account, capability))
    }
}

pub struct Setup {
    pub env: Env,
    pub ledger: StakeVestingClient<'static>,
    pub registry: MockRegistryClient<'static>,
    pub token: token::Client<'static>,
    pub token_sac: token::StellarAssetClient<'static>,
    pub vesting_admin: Address,
    pub oracle: Address,
    pub penalty_sink: Address,
}

impl Setup {
    /// Ledger with default config, one funded `VestingAdmin` and one `ContributionOracle`.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(1_000);

        let registry_id = env.register(MockRegistry, ());
        let registry = MockRegistryClient::new(&env, &registry_id);

        let token_admin = Address::generate(&env);
        let sac = env.register_stellar_asset_contract_v2(token_admin);
        let token = token::Client::new(&env, &sac.address());
        let token_sac = token::StellarAssetClient::new(&env, &sac.address());

        let deployer = Address::generate(&env);
        let ledger_id = env.register(StakeVesting, (deployer,));
        let ledger = StakeVestingClient::new(&env, &ledger_id);
        let penalty_sink = Address::generate(&env);
        ledger.init(&StakingConfig::default_for(
            sac.address(),
            registry_id,
            penalty_sink.clone(),
        ));

        let vesting_admin = Address::generate(&env);
        registry.grant(&vesting_admin, &Capability::VestingAdmin);
        token_sac.mint(&vesting_admin, &1_000_000_000);

        let oracle = Address::generate(&env);
        registry.grant(&oracle, &Capability::ContributionOracle);

        Setup {
            env,
            ledger,
            registry,
            token,
            token_sac,
            vesting_admin,
            oracle,
            penalty_sink,
        }
    }

    /// Fresh account holding `balance` tokens.
    pub fn account(&self, balance: i128) -> Address {
        let account = Address::generate(&self.env);
        if balance > 0 {
            self.token_sac.mint(&account, &balance);
        }
        account
    }

    pub fn fund_rewards(&self, amount: i128) {
        let funder = self.account(amount);
        self.ledger.fund_rewards(&funder, &amount);
    }

    pub fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    pub fn advance(&self, seconds: u64) {
        let now = self.now();
        self.env.ledger().set_timestamp(now + seconds);
    }
}
