use solana_sdk::{instruction::Instruction, system_instruction};
use spl_token_2022::{extension::ExtensionType, state::Mint};
use spl_token_metadata_interface::state::TokenMetadata;

use crate::{
    core::{token_program_id, LaunchResult},
    prelude::*,
};

/// Name, symbol and URI written into the mint's metadata extension
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OnChainMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

/// Parameters for creating and funding a new mint
#[derive(Clone, Debug)]
pub struct MintParams {
    /// Fee payer, mint authority, metadata update authority and token recipient
    pub payer: Pubkey,
    /// Address of the account being created
    pub mint: Pubkey,
    pub decimals: u8,
    /// Base units minted to the payer's associated account
    pub raw_amount: u64,
    /// `None` creates a bare mint without extensions
    pub metadata: Option<OnChainMetadata>,
}

/// Byte sizes the mint account is created and funded for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintLayout {
    /// Space allocated by the create-account instruction
    pub mint_space: usize,
    /// Space the rent-exempt balance must cover once metadata is written
    pub rent_space: usize,
}

/// Builds the ordered instruction list for a token launch
pub struct MintInstructionBuilder {
    token_program: Pubkey,
}

impl MintInstructionBuilder {
    pub fn new() -> Self {
        Self {
            token_program: token_program_id(),
        }
    }

    pub fn token_program(&self) -> Pubkey {
        self.token_program
    }

    /// Compute the account sizes for `params`
    ///
    /// Token metadata is variable length and reallocates the mint when it is
    /// initialized, so only the fixed extensions are allocated up front while
    /// the lamports cover both.
    pub fn layout(&self, params: &MintParams) -> LaunchResult<MintLayout> {
        let extensions: &[ExtensionType] = match params.metadata {
            Some(_) => &[ExtensionType::MetadataPointer],
            None => &[],
        };
        let mint_space = ExtensionType::try_calculate_account_len::<Mint>(extensions)?;

        let metadata_space = match &params.metadata {
            Some(metadata) => TokenMetadata {
                mint: params.mint,
                name: metadata.name.clone(),
                symbol: metadata.symbol.clone(),
                uri: metadata.uri.clone(),
                ..Default::default()
            }
            .tlv_size_of()?,
            None => 0,
        };

        Ok(MintLayout {
            mint_space,
            rent_space: mint_space + metadata_space,
        })
    }

    /// Token account that receives the initial supply
    pub fn associated_account(&self, params: &MintParams) -> Pubkey {
        spl_associated_token_account::get_associated_token_address_with_program_id(
            &params.payer,
            &params.mint,
            &self.token_program,
        )
    }

    /// Build the launch instructions in execution order
    ///
    /// The mint account is created and initialized before anything that
    /// references it, and the associated account exists before it is minted to.
    pub fn build(
        &self,
        params: &MintParams,
        layout: &MintLayout,
        lamports: u64,
    ) -> LaunchResult<Vec<Instruction>> {
        let program = &self.token_program;
        let mut instructions = Vec::with_capacity(6);

        instructions.push(system_instruction::create_account(
            &params.payer,
            &params.mint,
            lamports,
            layout.mint_space as u64,
            program,
        ));

        if params.metadata.is_some() {
            instructions.push(
                spl_token_2022::extension::metadata_pointer::instruction::initialize(
                    program,
                    &params.mint,
                    Some(params.payer),
                    Some(params.mint),
                )?,
            );
        }

        instructions.push(spl_token_2022::instruction::initialize_mint2(
            program,
            &params.mint,
            &params.payer,
            None,
            params.decimals,
        )?);

        if let Some(metadata) = &params.metadata {
            instructions.push(spl_token_metadata_interface::instruction::initialize(
                program,
                &params.mint,
                &params.payer,
                &params.mint,
                &params.payer,
                metadata.name.clone(),
                metadata.symbol.clone(),
                metadata.uri.clone(),
            ));
        }

        let associated_account = self.associated_account(params);
        instructions.push(
            spl_associated_token_account::instruction::create_associated_token_account(
                &params.payer,
                &params.payer,
                &params.mint,
                program,
            ),
        );

        instructions.push(spl_token_2022::instruction::mint_to(
            program,
            &params.mint,
            &associated_account,
            &params.payer,
            &[],
            params.raw_amount,
        )?);

        Ok(instructions)
    }
}

impl Default for MintInstructionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
