use gif_portal_sdk::core::connection::SolConnection;
use gif_portal_sdk::core::constants::VERIFY_GIF_LINK;
use gif_portal_sdk::{GifPortalProgram, KeypairWallet, PortalError, WalletProvider};
use solana_sdk::signature::{Keypair, Signer};

mod common;
use common::MockLedger;

struct Setup {
    ledger: MockLedger,
    base_account: Keypair,
    wallet: KeypairWallet,
}

impl Setup {
    fn new() -> Self {
        Self {
            ledger: MockLedger::new(solana_sdk::pubkey::Pubkey::new_unique()),
            base_account: Keypair::new(),
            wallet: KeypairWallet::trusted(Keypair::new()),
        }
    }

    fn program(&self) -> GifPortalProgram<'_> {
        GifPortalProgram::new(self.ledger.program_id, &self.base_account)
    }
}

/// initialize -> 0 entries -> add_gif -> 1 matching entry
#[test_log::test(tokio::test)]
async fn test_verification_sequence() {
    let setup = Setup::new();
    let program = setup.program();
    let user = setup.wallet.pubkey();

    program
        .initialize(&setup.ledger, &setup.wallet, &user)
        .await
        .expect("initialize failed");

    let account = program.fetch_account(&setup.ledger).await.unwrap();
    assert_eq!(account.total_gifs, 0);
    assert!(account.gif_list.is_empty());

    program
        .add_gif(&setup.ledger, &setup.wallet, &user, VERIFY_GIF_LINK)
        .await
        .expect("add_gif failed");

    let account = program.fetch_account(&setup.ledger).await.unwrap();
    assert_eq!(account.total_gifs, 1);
    assert_eq!(account.gif_list.len(), 1);
    assert_eq!(account.gif_list[0].gif_link, VERIFY_GIF_LINK);
    assert_eq!(account.gif_list[0].user_address, user);
}

#[test_log::test(tokio::test)]
async fn test_fetch_before_initialize_reports_missing_account() {
    let setup = Setup::new();
    let result = setup.program().fetch_account(&setup.ledger).await;
    assert!(matches!(
        result,
        Err(PortalError::AccountNotFound(address)) if address == setup.base_account.pubkey()
    ));
}

#[test_log::test(tokio::test)]
async fn test_second_initialize_is_rejected() {
    let setup = Setup::new();
    let program = setup.program();
    let user = setup.wallet.pubkey();

    program
        .initialize(&setup.ledger, &setup.wallet, &user)
        .await
        .unwrap();
    let again = program.initialize(&setup.ledger, &setup.wallet, &user).await;
    assert!(matches!(again, Err(PortalError::Connection(_))));
}

#[test_log::test(tokio::test)]
async fn test_initialize_transaction_carries_base_account_signature() {
    let setup = Setup::new();
    let program = setup.program();
    let user = setup.wallet.pubkey();
    let blockhash = setup.ledger.get_latest_blockhash().await.unwrap();

    let tx = program.initialize_transaction(&user, blockhash).unwrap();
    assert!(!tx.is_signed(), "wallet signature still missing");
    assert_eq!(tx.message.account_keys[0], user, "wallet pays the fees");

    let tx = setup.wallet.sign_transaction(tx).await.unwrap();
    assert!(tx.is_signed());
    tx.verify().unwrap();
}

#[test_log::test(tokio::test)]
async fn test_foreign_wallet_cannot_sign_for_user() {
    let setup = Setup::new();
    let program = setup.program();
    let stranger = KeypairWallet::trusted(Keypair::new());
    let user = setup.wallet.pubkey();

    let result = program
        .add_gif(&setup.ledger, &stranger, &user, VERIFY_GIF_LINK)
        .await;
    assert!(matches!(result, Err(PortalError::Signing(_))));
    assert_eq!(setup.ledger.sends(), 0);
}
