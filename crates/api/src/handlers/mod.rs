pub mod clothswap;
