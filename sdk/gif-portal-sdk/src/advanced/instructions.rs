use crate::core::constants::{ADD_GIF_IX, INITIALIZE_IX};
use crate::error::Result;
use crate::utils::instruction_discriminator;
use borsh::BorshSerialize;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

/// Instruction data: discriminator followed by the Borsh-encoded arguments.
fn instruction_data(name: &str, args: &impl BorshSerialize) -> Result<Vec<u8>> {
    let mut data = instruction_discriminator(name).to_vec();
    borsh::to_writer(&mut data, args)?;
    Ok(data)
}

/// Create the account holding the GIF list.
///
/// Accounts:
/// 0. `[writable, signer]` Base account
/// 1. `[writable, signer]` User (payer)
/// 2. `[]` System program
pub fn initialize(program_id: &Pubkey, base_account: &Pubkey, user: &Pubkey) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new(*base_account, true),
        AccountMeta::new(*user, true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: instruction_data(INITIALIZE_IX, &())?,
    })
}

/// Append a GIF link to the list.
///
/// Accounts:
/// 0. `[writable]` Base account
/// 1. `[writable, signer]` User
pub fn add_gif(
    program_id: &Pubkey,
    base_account: &Pubkey,
    user: &Pubkey,
    gif_link: &str,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new(*base_account, false),
        AccountMeta::new(*user, true),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: instruction_data(ADD_GIF_IX, &gif_link.to_string())?,
    })
}
