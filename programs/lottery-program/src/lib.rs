use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

declare_id!("5deuYBh7h92YC51ReiSpWmshX5cVM6tbQXncjwRp3iRw");

#[program]
pub mod lottery_program {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        instructions::initialize::initialize(ctx, params)
    }

    pub fn open_round(ctx: Context<OpenRound>, round_id: u64) -> Result<()> {
        instructions::open_round::open_round(ctx, round_id)
    }

    pub fn enter_lottery(
        ctx: Context<EnterLottery>,
        round_id: u64,
        entries: u64,
        amount: u64,
    ) -> Result<()> {
        instructions::enter_lottery::enter_lottery(ctx, round_id, entries, amount)
    }

    pub fn get_refund(ctx: Context<GetRefund>, round_id: u64) -> Result<()> {
        instructions::get_refund::get_refund(ctx, round_id)
    }

    pub fn publish_randomness(ctx: Context<PublishRandomness>, value: [u8; 32]) -> Result<()> {
        instructions::publish_randomness::publish_randomness(ctx, value)
    }

    pub fn select_winner(
        ctx: Context<SelectWinner>,
        round_id: u64,
        winner: Pubkey,
    ) -> Result<()> {
        instructions::select_winner::select_winner(ctx, round_id, winner)
    }

    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw::withdraw(ctx)
    }

    pub fn convert_fees(ctx: Context<ConvertFees>) -> Result<()> {
        instructions::convert_fees::convert_fees(ctx)
    }

    pub fn current_round_id(ctx: Context<ReadConfig>) -> Result<u64> {
        instructions::queries::current_round_id(ctx)
    }

    pub fn slot_owner(ctx: Context<ReadRound>, round_id: u64, slot: u64) -> Result<Pubkey> {
        instructions::queries::slot_owner(ctx, round_id, slot)
    }

    pub fn balance_of(ctx: Context<ReadCredit>, account: Pubkey) -> Result<u64> {
        instructions::queries::balance_of(ctx, account)
    }

    pub fn fee_pool(ctx: Context<ReadLedger>) -> Result<u64> {
        instructions::queries::fee_pool(ctx)
    }

    pub fn can_select_winner(ctx: Context<ReadRoundState>, round_id: u64) -> Result<bool> {
        instructions::queries::can_select_winner(ctx, round_id)
    }

    pub fn can_refund(ctx: Context<ReadRoundState>, round_id: u64) -> Result<bool> {
        instructions::queries::can_refund(ctx, round_id)
    }
}
