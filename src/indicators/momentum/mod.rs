pub mod stochastic;
