#![allow(dead_code)]

extern crate std;

use soroban_sdk::Address;

use crate::testutils::Setup;
use crate::Lock;

/// INV-1: a lock never releases more than it holds.
pub fn assert_lock_bounds(lock: &Lock) {
    assert!(
        lock.claimed_amount >= 0 && lock.claimed_amount <= lock.amount,
        "INV-1 violated: claimed {} outside 0..={}",
        lock.claimed_amount,
        lock.amount
    );
}

/// INV-2: the locked half is the larger half of the reward.
pub fn assert_split(total: i128, immediate: i128, locked: i128) {
    assert_eq!(immediate + locked, total, "INV-2 violated: split loses value");
    assert_eq!(immediate, total / 2, "INV-2 violated: immediate != total / 2");
}

/// INV-3: custody. The vault holds exactly the pool plus every unclaimed
/// lock remainder of the given owners (the only owners in the test).
pub fn assert_custody(setup: &Setup, owners: &[Address]) {
    let mut locked_remainder: i128 = 0;
    for owner in owners {
        for index in 0..setup.vault.get_lock_count(owner) {
            let lock = setup.vault.get_lock(owner, &index);
            assert_lock_bounds(&lock);
            locked_remainder += lock.amount - lock.claimed_amount;
        }
    }
    assert_eq!(
        setup.token.balance(&setup.vault.address),
        setup.vault.pool_balance() + locked_remainder,
        "INV-3 violated: vault balance != pool + locked remainder"
    );
}
