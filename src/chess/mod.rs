//! Implementation of chess rules: how the pieces move, check and checkmate
//! detection, castling, en passant and promotion.

pub mod board;
pub mod core;
pub mod game;
pub mod piece;
pub mod pieces;
pub mod position;
mod movegen;
