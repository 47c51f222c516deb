//! Test fixtures: a substitutable capability registry and a funded vault.

use incentive_common::{Capability, CapabilityRegistry};
use soroban_sdk::{
    contract, contractimpl, contracttype,
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::{RewardVault, RewardVaultClient, VaultConfig};

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Grant(Address, Capability),
}

/// Registry double whose grants are set directly by the test.
#[contract]
pub struct MockRegistry;

#[contractimpl]
impl MockRegistry {
    pub fn grant(env: Env, account: Address, capability: Capability) {
        env.storage()
            .persistent()
            .set(&MockKey::Grant(account, capability), &true);
    }

    pub fn revoke(env: Env, account: Address, capability: Capability) {
        env.storage()
            .persistent()
            .remove(&MockKey::Grant(account, capability));
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
    pub vault: RewardVaultClient<'static>,
    pub registry: MockRegistryClient<'static>,
    pub token: token::Client<'static>,
    pub token_sac: token::StellarAssetClient<'static>,
    pub distributor: Address,
    pub slash_sink: Address,
}

impl Setup {
    /// Vault with default config and one `Distributor`.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let registry_id = env.register(MockRegistry, ());
        let registry = MockRegistryClient::new(&env, &registry_id);

        let token_admin = Address::generate(&env);
        let sac = env.register_stellar_asset_contract_v2(token_admin);
        let token = token::Client::new(&env, &sac.address());
        let token_sac = token::StellarAssetClient::new(&env, &sac.address());

        let deployer = Address::generate(&env);
        let vault_id = env.register(RewardVault, (deployer,));
        let vault = RewardVaultClient::new(&env, &vault_id);
        let slash_sink = Address::generate(&env);
        vault.init(&VaultConfig::default_for(
            sac.address(),
            registry_id,
            slash_sink.clone(),
        ));

        let distributor = Address::generate(&env);
        registry.grant(&distributor, &Capability::Distributor);

        Setup {
            env,
            vault,
            registry,
            token,
            token_sac,
            distributor,
            slash_sink,
        }
    }

    /// Mint `amount` to a fresh funder and move it into the pool.
    pub fn fund_pool(&self, amount: i128) {
        let funder = Address::generate(&self.env);
        self.token_sac.mint(&funder, &amount);
        self.vault.fund_pool(&funder, &amount);
    }

    pub fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    pub fn advance(&self, seconds: u64) {
        let now = self.now();
        self.env.ledger().set_timestamp(now + seconds);
    }
}
