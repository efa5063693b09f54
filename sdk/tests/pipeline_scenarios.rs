//! End-to-end launch scenarios against recording collaborators

mod helpers;

use std::sync::Arc;

use helpers::*;
use launchpad_sdk::{
    config::LaunchSettings,
    core::{ErrorKind, ImagePolicy, LaunchError, MetadataMode, TokenForm},
    LaunchPhase, TOKEN_PROGRAM_ID,
};
use rust_decimal::Decimal;
use solana_sdk::{system_program, transaction::Transaction};

fn demo_form() -> TokenForm {
    TokenForm::new("Demo", "DMO")
        .with_decimals(9)
        .with_supply(Decimal::ONE_HUNDRED)
}

fn program_ids(tx: &Transaction) -> Vec<solana_sdk::pubkey::Pubkey> {
    tx.message
        .instructions
        .iter()
        .map(|ix| tx.message.account_keys[ix.program_id_index as usize])
        .collect()
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[tokio::test]
async fn test_demo_launch_without_image() {
    let harness = Harness::with_defaults();
    let payer = harness.payer();

    let outcome = harness.launchpad.submit(demo_form()).await.unwrap();

    assert_eq!(harness.pinning.asset_calls(), 0);
    assert_eq!(harness.pinning.metadata_calls(), 0);
    assert_eq!(harness.chain.rent_calls(), 1);
    assert_eq!(harness.chain.blockhash_calls(), 1);
    assert_eq!(harness.wallet.calls(), 1);

    let tx = harness.wallet.last_submitted().unwrap();
    assert!(tx.message.instructions.len() >= 4);
    assert!(tx.is_signed());
    assert_eq!(tx.message.account_keys[0], payer);
    assert_eq!(tx.signatures[0], outcome.signature);

    let decoded = bs58::decode(outcome.mint.to_string()).into_vec().unwrap();
    assert_eq!(decoded.len(), 32);
    assert_eq!(outcome.raw_amount, 100_000_000_000);
    assert!(outcome.metadata_uri.is_none());

    assert_eq!(
        harness.launchpad.phase(),
        LaunchPhase::Succeeded {
            mint: outcome.mint,
            signature: outcome.signature,
        }
    );
    assert!(!harness.launchpad.is_busy());
}

#[tokio::test]
async fn test_instruction_order() {
    let harness = Harness::with_defaults();
    let outcome = harness.launchpad.submit(demo_form()).await.unwrap();
    let tx = harness.wallet.last_submitted().unwrap();

    let programs = program_ids(&tx);
    assert_eq!(programs.len(), 6);
    assert_eq!(programs[0], system_program::id());
    assert_eq!(programs[4], spl_associated_token_account::id());
    for program in [programs[1], programs[2], programs[3], programs[5]] {
        assert_eq!(program, TOKEN_PROGRAM_ID);
    }

    // Every instruction after account creation references the mint
    let mint_index = tx
        .message
        .account_keys
        .iter()
        .position(|key| *key == outcome.mint)
        .unwrap() as u8;
    for ix in &tx.message.instructions[1..] {
        assert!(ix.accounts.contains(&mint_index));
    }

    // The associated account is created before it is minted to
    let ata_index = tx
        .message
        .account_keys
        .iter()
        .position(|key| *key == outcome.associated_account)
        .unwrap() as u8;
    let first_use = tx
        .message
        .instructions
        .iter()
        .position(|ix| ix.accounts.contains(&ata_index))
        .unwrap();
    assert_eq!(first_use, 4);
}

#[tokio::test]
async fn test_rent_covers_metadata() {
    let harness = Harness::with_defaults();
    harness
        .launchpad
        .submit(demo_form().with_uri("https://example.com/demo.json"))
        .await
        .unwrap();

    let queried = harness.chain.rent_queries.lock().unwrap().clone();
    assert_eq!(queried.len(), 1);
    // Mint with metadata pointer is 234 bytes; the metadata TLV comes on top
    assert!(queried[0] > 234);
}

#[tokio::test]
async fn test_omitted_metadata_builds_bare_mint() {
    let settings = LaunchSettings {
        metadata: MetadataMode::Omitted,
        ..Default::default()
    };
    let harness = Harness::new(MockPinning::default(), MockWallet::connected(), settings);
    harness.launchpad.submit(demo_form()).await.unwrap();

    let tx = harness.wallet.last_submitted().unwrap();
    assert_eq!(tx.message.instructions.len(), 4);
    assert_eq!(
        harness.chain.rent_queries.lock().unwrap().as_slice(),
        &[82]
    );
}

#[tokio::test]
async fn test_no_wallet_touches_nothing() {
    let harness = Harness::new(
        MockPinning::default(),
        MockWallet::disconnected(),
        LaunchSettings::default(),
    );

    let err = harness
        .launchpad
        .submit(demo_form().with_image(png("logo.png")))
        .await
        .unwrap_err();

    assert!(matches!(err, LaunchError::WalletNotConnected));
    assert_eq!(err.to_string(), "Connect your wallet first");
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert_eq!(harness.pinning.asset_calls(), 0);
    assert_eq!(harness.pinning.metadata_calls(), 0);
    assert_eq!(harness.chain.rent_calls(), 0);
    assert_eq!(harness.chain.blockhash_calls(), 0);
    assert_eq!(harness.wallet.calls(), 0);
}

#[tokio::test]
async fn test_missing_symbol_touches_nothing() {
    let harness = Harness::with_defaults();
    let err = harness
        .launchpad
        .submit(TokenForm::new("Demo", "   "))
        .await
        .unwrap_err();

    assert!(matches!(err, LaunchError::MissingField("symbol")));
    assert_eq!(harness.chain.rent_calls(), 0);
    assert_eq!(harness.wallet.calls(), 0);
}

#[tokio::test]
async fn test_required_image_missing() {
    let settings = LaunchSettings {
        image_upload: ImagePolicy::Required,
        ..Default::default()
    };
    let harness = Harness::new(MockPinning::default(), MockWallet::connected(), settings);

    let err = harness.launchpad.submit(demo_form()).await.unwrap_err();

    assert!(matches!(err, LaunchError::MissingImage));
    assert_eq!(harness.pinning.asset_calls(), 0);
    assert_eq!(harness.wallet.calls(), 0);
}

#[tokio::test]
async fn test_asset_upload_failure_stops_pipeline() {
    let harness = Harness::new(
        MockPinning::failing_asset(),
        MockWallet::connected(),
        LaunchSettings::default(),
    );

    let err = harness
        .launchpad
        .submit(demo_form().with_image(png("logo.png")))
        .await
        .unwrap_err();

    assert!(matches!(err, LaunchError::AssetUpload(_)));
    assert_eq!(err.kind(), ErrorKind::Upload);
    assert_eq!(harness.pinning.asset_calls(), 1);
    assert_eq!(harness.pinning.metadata_calls(), 0);
    assert_eq!(harness.chain.rent_calls(), 0);
    assert_eq!(harness.chain.blockhash_calls(), 0);
    assert_eq!(harness.wallet.calls(), 0);

    match harness.launchpad.phase() {
        LaunchPhase::Failed(reason) => assert!(reason.contains("asset upload failed")),
        other => panic!("unexpected phase {:?}", other),
    }
}

#[tokio::test]
async fn test_metadata_upload_failure_stops_pipeline() {
    let harness = Harness::new(
        MockPinning::failing_metadata(),
        MockWallet::connected(),
        LaunchSettings::default(),
    );

    let err = harness
        .launchpad
        .submit(demo_form().with_image(png("logo.png")))
        .await
        .unwrap_err();

    assert!(matches!(err, LaunchError::MetadataUpload(_)));
    assert!(err.to_string().starts_with("metadata upload failed"));
    assert_eq!(harness.pinning.asset_calls(), 1);
    assert_eq!(harness.pinning.metadata_calls(), 1);
    assert_eq!(harness.chain.rent_calls(), 0);
    assert_eq!(harness.chain.blockhash_calls(), 0);
    assert_eq!(harness.wallet.calls(), 0);
}

#[tokio::test]
async fn test_image_launch_embeds_metadata_uri() {
    let harness = Harness::with_defaults();

    let outcome = harness
        .launchpad
        .submit(
            demo_form()
                .with_description("A demo token")
                .with_image(png("logo.png")),
        )
        .await
        .unwrap();

    assert_eq!(harness.pinning.asset_calls(), 1);
    assert_eq!(harness.pinning.metadata_calls(), 1);

    let metadata_uri = format!("{}/ipfs/metadata-cid", GATEWAY);
    assert_eq!(
        outcome.metadata_uri.as_ref().map(|uri| uri.as_str()),
        Some(metadata_uri.as_str())
    );

    let documents = harness.pinning.documents.lock().unwrap().clone();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].name, "Demo");
    assert_eq!(documents[0].symbol, "DMO");
    assert_eq!(documents[0].description, "A demo token");
    assert_eq!(documents[0].image, format!("{}/ipfs/image-logo.png", GATEWAY));
    assert_eq!(documents[0].properties.files[0].content_type, "image/png");

    let tx = harness.wallet.last_submitted().unwrap();
    let metadata_ix = &tx.message.instructions[3];
    assert!(contains_bytes(&metadata_ix.data, metadata_uri.as_bytes()));
}

#[tokio::test]
async fn test_disabled_policy_ignores_image() {
    let settings = LaunchSettings {
        image_upload: ImagePolicy::Disabled,
        default_metadata_uri: "https://example.com/fallback.json".to_string(),
        ..Default::default()
    };
    let harness = Harness::new(MockPinning::default(), MockWallet::connected(), settings);

    let outcome = harness
        .launchpad
        .submit(demo_form().with_image(png("logo.png")))
        .await
        .unwrap();

    assert_eq!(harness.pinning.asset_calls(), 0);
    assert_eq!(harness.pinning.metadata_calls(), 0);
    assert!(outcome.metadata_uri.is_none());

    let tx = harness.wallet.last_submitted().unwrap();
    assert!(contains_bytes(
        &tx.message.instructions[3].data,
        b"https://example.com/fallback.json"
    ));
}

#[tokio::test]
async fn test_wallet_rejection_is_terminal() {
    let harness = Harness::new(
        MockPinning::default(),
        MockWallet::rejecting(),
        LaunchSettings::default(),
    );

    let err = harness.launchpad.submit(demo_form()).await.unwrap_err();

    assert!(matches!(err, LaunchError::Submission(_)));
    assert_eq!(err.kind(), ErrorKind::Submission);
    assert_eq!(harness.wallet.calls(), 1);
    assert!(matches!(harness.launchpad.phase(), LaunchPhase::Failed(_)));
}

#[tokio::test]
async fn test_second_submit_while_busy() {
    let gate = Arc::new(tokio::sync::Notify::new());
    let harness = Arc::new(Harness::new(
        MockPinning::default(),
        MockWallet::gated(gate.clone()),
        LaunchSettings::default(),
    ));

    let first = {
        let harness = harness.clone();
        tokio::spawn(async move { harness.launchpad.submit(demo_form()).await })
    };

    while harness.wallet.calls() == 0 {
        tokio::task::yield_now().await;
    }
    assert!(harness.launchpad.is_busy());
    assert_eq!(harness.launchpad.phase(), LaunchPhase::AwaitingSignature);

    let err = harness.launchpad.submit(demo_form()).await.unwrap_err();
    assert!(matches!(err, LaunchError::AttemptInProgress));
    assert_eq!(harness.launchpad.phase(), LaunchPhase::AwaitingSignature);

    gate.notify_one();
    let outcome = first.await.unwrap().unwrap();
    assert_eq!(harness.wallet.calls(), 1);
    assert!(matches!(
        harness.launchpad.phase(),
        LaunchPhase::Succeeded { mint, .. } if mint == outcome.mint
    ));
    assert!(!harness.launchpad.is_busy());
}

#[tokio::test]
async fn test_phase_stream_reaches_terminal_state() {
    let harness = Harness::with_defaults();
    let mut phases = harness.launchpad.subscribe();
    assert_eq!(*phases.borrow(), LaunchPhase::Idle);

    harness.launchpad.submit(demo_form()).await.unwrap();

    assert!(phases.has_changed().unwrap());
    assert!(phases.borrow_and_update().is_terminal());
}
