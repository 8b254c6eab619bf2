use core::fmt;

pub type Result<T> = core::result::Result<T, Error>;

// -------- genesis --------

pub const TOKEN_NAME: &str = "EMotiveToken";
pub const TOKEN_SYMBOL: &str = "EMOT";
pub const TOKEN_DECIMALS: u8 = 18;

/// One whole token in base units.
pub const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Allocated to the deployer by `new()`.
pub const INITIAL_SUPPLY: u128 = 500_000_000 * ONE_TOKEN;

/// Ceiling on cumulative total supply for the reference deployment.
pub const MAX_SUPPLY: u128 = 500_000_000 * ONE_TOKEN;

// -------- roles --------

#[derive(scale::Encode, scale::Decode, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Role {
    Admin,
    Minter,
}

// -------- errors --------

#[derive(scale::Encode, scale::Decode, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Error {
    Unauthorized(Role),
    InvalidRecipient,
    InvalidMintRecipient,
    InvalidSpender,
    InsufficientBalance,
    InsufficientAllowance,
    AllowanceUnderflow,
    SupplyCapExceeded,
    Overflow,
}

impl Error {
    /// Revert reason reported to callers. These strings are part of the
    /// public interface and must not change.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::Unauthorized(Role::Admin) => "Restricted to admins.",
            Error::Unauthorized(Role::Minter) => "Restricted to minters.",
            Error::InvalidRecipient => "ERC20: transfer to the zero address",
            Error::InvalidMintRecipient => "ERC20: mint to the zero address",
            Error::InvalidSpender => "ERC20: approve to the zero address",
            Error::InsufficientBalance => "ERC20: transfer amount exceeds balance",
            Error::InsufficientAllowance => "ERC20: transfer amount exceeds allowance",
            Error::AllowanceUnderflow => "ERC20: decreased allowance below zero",
            Error::SupplyCapExceeded => "Cannot mint more than Final Supply.",
            Error::Overflow => "SafeMath: addition overflow",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_allocation_fits_balance_width() {
        assert_eq!(INITIAL_SUPPLY, 500_000_000u128 * 10u128.pow(TOKEN_DECIMALS as u32));
        assert!(INITIAL_SUPPLY <= MAX_SUPPLY);
    }

    #[test]
    fn unauthorized_reason_names_the_missing_role() {
        assert_eq!(Error::Unauthorized(Role::Admin).reason(), "Restricted to admins.");
        assert_eq!(Error::Unauthorized(Role::Minter).reason(), "Restricted to minters.");
    }

    #[test]
    fn display_matches_reason() {
        let err = Error::SupplyCapExceeded;
        assert_eq!(format!("{err}"), "Cannot mint more than Final Supply.");
    }
}
