#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod model;

#[ink::contract]
mod emotive_token {
    use crate::model::{
        Error, Result, Role, INITIAL_SUPPLY, MAX_SUPPLY, TOKEN_DECIMALS, TOKEN_NAME,
        TOKEN_SYMBOL,
    };
    use ink::prelude::string::{String, ToString};
    use ink::storage::Mapping;

    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)]
        from_acc: AccountId,
        #[ink(topic)]
        to_acc: AccountId,
        amount: Balance,
    }

    #[ink(event)]
    pub struct Approval {
        #[ink(topic)]
        owner_acc: AccountId,
        #[ink(topic)]
        spender_acc: AccountId,
        amount: Balance,
    }

    #[ink(event)]
    pub struct RoleGranted {
        #[ink(topic)]
        role: Role,
        #[ink(topic)]
        account_acc: AccountId,
        sender_acc: AccountId,
    }

    #[ink(event)]
    pub struct RoleRevoked {
        #[ink(topic)]
        role: Role,
        #[ink(topic)]
        account_acc: AccountId,
        sender_acc: AccountId,
    }

    #[ink(storage)]
    pub struct EmotiveToken {
        // access control
        admins: Mapping<AccountId, ()>,
        minters: Mapping<AccountId, ()>,

        // token state
        total_supply: Balance,
        max_supply: Balance,
        balances: Mapping<AccountId, Balance>,
        allowances: Mapping<(AccountId, AccountId), Balance>,
    }

    /// Sentinel account: never a recipient or spender, source of mint transfers.
    fn zero_acc() -> AccountId {
        AccountId::from([0x0; 32])
    }

    impl EmotiveToken {
        // -------- constructors --------

        /// Reference deployment: the whole capped supply goes to the deployer.
        #[ink(constructor)]
        pub fn new() -> Self {
            Self::genesis(INITIAL_SUPPLY, MAX_SUPPLY)
        }

        /// Variant deployment with a cap above the genesis allocation.
        #[ink(constructor)]
        pub fn with_cap(
            initial_supply: Balance,
            max_supply: Balance,
        ) -> core::result::Result<Self, Error> {
            if initial_supply > max_supply {
                return Err(Error::SupplyCapExceeded)
            }
            Ok(Self::genesis(initial_supply, max_supply))
        }

        fn genesis(initial_supply: Balance, max_supply: Balance) -> Self {
            let deployer_acc = Self::env().caller();

            let mut admins = Mapping::default();
            admins.insert(&deployer_acc, &());
            let mut minters = Mapping::default();
            minters.insert(&deployer_acc, &());
            let mut balances = Mapping::default();
            balances.insert(&deployer_acc, &initial_supply);

            for role in [Role::Admin, Role::Minter] {
                Self::env().emit_event(RoleGranted {
                    role,
                    account_acc: deployer_acc,
                    sender_acc: deployer_acc,
                });
            }
            Self::env().emit_event(Transfer {
                from_acc: zero_acc(),
                to_acc: deployer_acc,
                amount: initial_supply,
            });

            Self {
                admins,
                minters,
                total_supply: initial_supply,
                max_supply,
                balances,
                allowances: Mapping::default(),
            }
        }

        // -------- token info --------

        #[ink(message)]
        pub fn name(&self) -> String {
            TOKEN_NAME.to_string()
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            TOKEN_SYMBOL.to_string()
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            TOKEN_DECIMALS
        }

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn max_supply(&self) -> Balance {
            self.max_supply
        }

        // -------- access control --------

        #[ink(message)]
        pub fn is_admin(&self, account_acc: AccountId) -> bool {
            self.admins.contains(&account_acc)
        }

        #[ink(message)]
        pub fn is_minter(&self, account_acc: AccountId) -> bool {
            self.minters.contains(&account_acc)
        }

        #[ink(message)]
        pub fn add_admin_role(&mut self, account_acc: AccountId) -> Result<()> {
            self.grant_role(Role::Admin, account_acc)
        }

        #[ink(message)]
        pub fn remove_admin_role(&mut self, account_acc: AccountId) -> Result<()> {
            self.revoke_role(Role::Admin, account_acc)
        }

        #[ink(message)]
        pub fn add_minter_role(&mut self, account_acc: AccountId) -> Result<()> {
            self.grant_role(Role::Minter, account_acc)
        }

        #[ink(message)]
        pub fn remove_minter_role(&mut self, account_acc: AccountId) -> Result<()> {
            self.revoke_role(Role::Minter, account_acc)
        }

        // -------- balances & allowances --------

        #[ink(message)]
        pub fn balance_of(&self, owner_acc: AccountId) -> Balance {
            self.balances.get(&owner_acc).unwrap_or(0)
        }

        #[ink(message)]
        pub fn allowance(&self, owner_acc: AccountId, spender_acc: AccountId) -> Balance {
            self.allowances.get(&(owner_acc, spender_acc)).unwrap_or(0)
        }

        #[ink(message)]
        pub fn transfer(&mut self, to_acc: AccountId, amount: Balance) -> Result<()> {
            let from_acc = self.env().caller();
            self.move_balance(from_acc, to_acc, amount)
        }

        #[ink(message)]
        pub fn approve(&mut self, spender_acc: AccountId, amount: Balance) -> Result<()> {
            let owner_acc = self.env().caller();
            self.set_allowance(owner_acc, spender_acc, amount)
        }

        #[ink(message)]
        pub fn increase_allowance(&mut self, spender_acc: AccountId, added: Balance) -> Result<()> {
            let owner_acc = self.env().caller();
            let new_val = self
                .allowance(owner_acc, spender_acc)
                .checked_add(added)
                .ok_or(Error::Overflow)?;
            self.set_allowance(owner_acc, spender_acc, new_val)
        }

        #[ink(message)]
        pub fn decrease_allowance(
            &mut self,
            spender_acc: AccountId,
            subtracted: Balance,
        ) -> Result<()> {
            let owner_acc = self.env().caller();
            let new_val = self
                .allowance(owner_acc, spender_acc)
                .checked_sub(subtracted)
                .ok_or(Error::AllowanceUnderflow)?;
            self.set_allowance(owner_acc, spender_acc, new_val)
        }

        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from_acc: AccountId,
            to_acc: AccountId,
            amount: Balance,
        ) -> Result<()> {
            let spender_acc = self.env().caller();

            // Everything is checked before the first write.
            if to_acc == zero_acc() {
                return Err(Error::InvalidRecipient)
            }
            if self.balance_of(from_acc) < amount {
                return Err(Error::InsufficientBalance)
            }
            let new_allow = self
                .allowance(from_acc, spender_acc)
                .checked_sub(amount)
                .ok_or(Error::InsufficientAllowance)?;

            self.move_balance(from_acc, to_acc, amount)?;
            self.allowances.insert(&(from_acc, spender_acc), &new_allow);
            self.env().emit_event(Approval {
                owner_acc: from_acc,
                spender_acc,
                amount: new_allow,
            });
            Ok(())
        }

        // -------- capped minting --------

        /// Creates `amount` base units for `to_acc`. Caller must hold the
        /// Minter role and the resulting total supply may not pass the cap.
        #[ink(message)]
        pub fn mint(&mut self, to_acc: AccountId, amount: Balance) -> Result<()> {
            self.only_role(Role::Minter)?;

            let new_total = match self.total_supply.checked_add(amount) {
                Some(total) if total <= self.max_supply => total,
                _ => {
                    ink::env::debug_println!(
                        "mint of {} rejected: supply {} of {}",
                        amount,
                        self.total_supply,
                        self.max_supply
                    );
                    return Err(Error::SupplyCapExceeded)
                }
            };
            if to_acc == zero_acc() {
                return Err(Error::InvalidMintRecipient)
            }
            let new_to = self
                .balance_of(to_acc)
                .checked_add(amount)
                .ok_or(Error::Overflow)?;

            self.total_supply = new_total;
            self.balances.insert(&to_acc, &new_to);
            self.env().emit_event(Transfer {
                from_acc: zero_acc(),
                to_acc,
                amount,
            });
            Ok(())
        }

        // ---- internals ----

        fn role_contains(&self, role: Role, account_acc: &AccountId) -> bool {
            match role {
                Role::Admin => self.admins.contains(account_acc),
                Role::Minter => self.minters.contains(account_acc),
            }
        }

        fn role_insert(&mut self, role: Role, account_acc: &AccountId) {
            match role {
                Role::Admin => {
                    self.admins.insert(account_acc, &());
                }
                Role::Minter => {
                    self.minters.insert(account_acc, &());
                }
            }
        }

        fn role_remove(&mut self, role: Role, account_acc: &AccountId) {
            match role {
                Role::Admin => self.admins.remove(account_acc),
                Role::Minter => self.minters.remove(account_acc),
            }
        }

        fn only_role(&self, role: Role) -> Result<()> {
            let caller_acc = self.env().caller();
            if !self.role_contains(role, &caller_acc) {
                ink::env::debug_println!("{:?} check failed for {:?}", role, caller_acc);
                return Err(Error::Unauthorized(role))
            }
            Ok(())
        }

        /// Admin-gated; adding an existing member is a silent no-op.
        fn grant_role(&mut self, role: Role, account_acc: AccountId) -> Result<()> {
            self.only_role(Role::Admin)?;
            if self.role_contains(role, &account_acc) {
                return Ok(())
            }
            self.role_insert(role, &account_acc);
            let sender_acc = self.env().caller();
            self.env().emit_event(RoleGranted { role, account_acc, sender_acc });
            Ok(())
        }

        /// Admin-gated; removing a non-member is a silent no-op. The last
        /// admin may remove itself.
        fn revoke_role(&mut self, role: Role, account_acc: AccountId) -> Result<()> {
            self.only_role(Role::Admin)?;
            if !self.role_contains(role, &account_acc) {
                return Ok(())
            }
            self.role_remove(role, &account_acc);
            let sender_acc = self.env().caller();
            self.env().emit_event(RoleRevoked { role, account_acc, sender_acc });
            Ok(())
        }

        fn set_allowance(
            &mut self,
            owner_acc: AccountId,
            spender_acc: AccountId,
            amount: Balance,
        ) -> Result<()> {
            if spender_acc == zero_acc() {
                return Err(Error::InvalidSpender)
            }
            self.allowances.insert(&(owner_acc, spender_acc), &amount);
            self.env().emit_event(Approval { owner_acc, spender_acc, amount });
            Ok(())
        }

        fn move_balance(&mut self, from_acc: AccountId, to_acc: AccountId, amount: Balance) -> Result<()> {
            if to_acc == zero_acc() {
                return Err(Error::InvalidRecipient)
            }
            let from_bal = self.balance_of(from_acc);
            if from_bal < amount {
                return Err(Error::InsufficientBalance)
            }
            if from_acc != to_acc {
                let new_from = from_bal.checked_sub(amount).ok_or(Error::Overflow)?;
                let new_to = self
                    .balance_of(to_acc)
                    .checked_add(amount)
                    .ok_or(Error::Overflow)?;
                self.balances.insert(&from_acc, &new_from);
                self.balances.insert(&to_acc, &new_to);
            }

            self.env().emit_event(Transfer { from_acc, to_acc, amount });
            Ok(())
        }
    }


    #[cfg(all(test, feature = "e2e-tests"))]
    mod e2e_tests {
        use super::*;
        use ink_e2e::ContractsBackend;

        type E2EResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

        #[ink_e2e::test]
        async fn e2e_transfer<Client: E2EBackend>(mut client: Client) -> E2EResult<()> {
            let mut constructor = EmotiveTokenRef::new();
            let contract = client
                .instantiate("emotive_token", &ink_e2e::alice(), &mut constructor)
                .submit()
                .await
                .expect("instantiate failed");
            let mut call_builder = contract.call_builder::<EmotiveToken>();

            let bob_acc = ink_e2e::account_id(ink_e2e::AccountKeyring::Bob);
            let transfer = call_builder.transfer(bob_acc, 1_000);
            let _ = client
                .call(&ink_e2e::alice(), &transfer)
                .submit()
                .await
                .expect("transfer failed");

            let balance_of = call_builder.balance_of(bob_acc);
            let balance = client
                .call(&ink_e2e::alice(), &balance_of)
                .dry_run()
                .await?
                .return_value();
            assert_eq!(balance, 1_000);
            Ok(())
        }

        #[ink_e2e::test]
        async fn e2e_mint_requires_minter<Client: E2EBackend>(
            mut client: Client,
        ) -> E2EResult<()> {
            let mut constructor = EmotiveTokenRef::with_cap(0, 1_000);
            let contract = client
                .instantiate("emotive_token", &ink_e2e::alice(), &mut constructor)
                .submit()
                .await
                .expect("instantiate failed");
            let mut call_builder = contract.call_builder::<EmotiveToken>();

            let bob_acc = ink_e2e::account_id(ink_e2e::AccountKeyring::Bob);
            let mint = call_builder.mint(bob_acc, 10);
            let result = client
                .call(&ink_e2e::bob(), &mint)
                .dry_run()
                .await?
                .return_value();
            assert_eq!(result, Err(Error::Unauthorized(Role::Minter)));

            let total_supply = call_builder.total_supply();
            let supply = client
                .call(&ink_e2e::alice(), &total_supply)
                .dry_run()
                .await?
                .return_value();
            assert_eq!(supply, 0);
            Ok(())
        }
    }
}
