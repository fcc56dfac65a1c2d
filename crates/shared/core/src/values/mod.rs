/// Simulation time, in ticks (one tick per simulated day in the sample data)
pub type Tick = i64;

/// Price in money units (cents)
pub type Price = i64;

/// Number of units of a security. Signed: a book may go short.
pub type Quantity = i64;

/// Amount of money in cents. Signed: fees may drive a balance negative.
pub type Money = i64;

/// Ticker symbol identifying a security
pub type Ticker = String;
