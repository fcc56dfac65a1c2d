//! Bootstrap - exchange and agent setup from data files
//!
//! Handles initial setup of the simulation:
//! - Listing securities and seeding prices
//! - Opening accounts and creating one trading agent per account
//! - Setting initial positions
//! - Queueing news events and submitting a batch of orders
//!
//! All files are comma-separated with a header line. Fields are trimmed.
//! A bad row is logged and skipped; it never aborts the load. Only a file
//! that cannot be opened is an error.

use csv::{ReaderBuilder, StringRecord, Trim};
use herald_core::{
    AccountKind, IdContext, Money, Order, Participant, ParticipantId, ParticipantKind, Price,
    Quantity, Security, SecurityList, Side, Tick,
};
use herald_exchange::StockExchange;
use herald_ports::ExchangeGateway;
use herald_strategy::ReactionStyle;
use log::{debug, info, trace, warn};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::agent::{AgentFactory, TradingAgent};
use crate::config::DataFiles;
use crate::event_feed::{EventRow, LoadReport, NewsBoard};

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, BootstrapError>;

/// Per-file outcome of [`SimulationBootstrap::load`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub securities: LoadReport,
    pub accounts: LoadReport,
    pub positions: LoadReport,
    pub prices: LoadReport,
    pub events: LoadReport,
    pub orders: Option<LoadReport>,
}

impl BootstrapReport {
    pub fn skipped(&self) -> usize {
        self.securities.skipped
            + self.accounts.skipped
            + self.positions.skipped
            + self.prices.skipped
            + self.events.skipped
            + self.orders.map_or(0, |r| r.skipped)
    }
}

/// Simulation bootstrap - sets up exchange, news board and agents
pub struct SimulationBootstrap {
    /// The exchange instance
    pub exchange: Arc<StockExchange>,
    /// The news board every agent is subscribed to
    pub news: Arc<NewsBoard>,
    /// Identifier allocators for this run
    pub ids: Arc<IdContext>,
    /// Agents in account-file order
    pub agents: Vec<Arc<TradingAgent>>,
    factory: AgentFactory,
}

impl SimulationBootstrap {
    /// Create an empty setup with fresh identifiers
    pub fn new() -> Self {
        Self::with_ids(IdContext::new())
    }

    /// Create an empty setup using `ids` for participants and orders
    pub fn with_ids(ids: IdContext) -> Self {
        let exchange = Arc::new(StockExchange::new());
        let news = Arc::new(NewsBoard::new());
        let ids = Arc::new(ids);
        let factory = AgentFactory::new(
            exchange.clone(),
            exchange.clone(),
            news.clone(),
            ids.clone(),
        );

        Self {
            exchange,
            news,
            ids,
            agents: Vec::new(),
            factory,
        }
    }

    pub fn factory(&self) -> &AgentFactory {
        &self.factory
    }

    /// Load every file in `files`, in dependency order
    pub fn load(&mut self, files: &DataFiles) -> Result<BootstrapReport> {
        let report = BootstrapReport {
            securities: self.read_securities(open(&files.securities)?),
            accounts: self.read_accounts(open(&files.accounts)?),
            positions: self.read_positions(open(&files.positions)?),
            prices: self.read_prices(open(&files.prices)?),
            events: self.read_events(open(&files.events)?),
            orders: match &files.orders {
                Some(path) => Some(self.read_orders(open(path)?)),
                None => None,
            },
        };

        info!(
            "Bootstrap complete: {} securities, {} accounts, {} prices, {} events pending, {} rows skipped",
            self.exchange.securities().len(),
            self.exchange.account_count(),
            self.exchange.price_count(),
            self.news.pending(),
            report.skipped()
        );
        Ok(report)
    }

    // ============ File loaders ============

    pub fn load_securities(&self, path: &Path) -> Result<LoadReport> {
        Ok(self.read_securities(open(path)?))
    }

    pub fn load_accounts(&mut self, path: &Path) -> Result<LoadReport> {
        Ok(self.read_accounts(open(path)?))
    }

    pub fn load_positions(&self, path: &Path) -> Result<LoadReport> {
        Ok(self.read_positions(open(path)?))
    }

    pub fn load_prices(&self, path: &Path) -> Result<LoadReport> {
        Ok(self.read_prices(open(path)?))
    }

    pub fn load_events(&self, path: &Path) -> Result<LoadReport> {
        Ok(self.read_events(open(path)?))
    }

    pub fn process_orders(&self, path: &Path) -> Result<LoadReport> {
        Ok(self.read_orders(open(path)?))
    }

    // ============ Readers ============

    /// `ticker, description`
    pub fn read_securities<R: Read>(&self, source: R) -> LoadReport {
        for_each_row(source, "securities", 2, |row| {
            let security = Security::new(&row[0], &row[1]);
            self.exchange.list_security(security);
            true
        })
    }

    /// `title, participantKind, accountKind, initialBalance, reactionStyle`
    ///
    /// Kinds are checked before an id is handed out, so a rejected row
    /// consumes none.
    pub fn read_accounts<R: Read>(&mut self, source: R) -> LoadReport {
        let mut created = Vec::new();

        let report = for_each_row(source, "accounts", 5, |row| {
            let Some(balance) = parse_field::<Money>(row, 3, "initial balance") else {
                return false;
            };
            let Some(kind) = parse_field::<ParticipantKind>(row, 1, "participant kind") else {
                return false;
            };
            let Some(account_kind) = parse_field::<AccountKind>(row, 2, "account kind") else {
                return false;
            };
            let style = ReactionStyle::from_account_column(&row[4]);

            let participant = Participant::allocate(&self.ids.participants, &row[0], kind);
            match self.exchange.open_account(participant, balance, account_kind) {
                Ok(ledger) => {
                    created.push(self.factory.spawn(ledger, style));
                    true
                }
                Err(e) => {
                    warn!("Skipping account {:?}: {}", &row[0], e);
                    false
                }
            }
        });

        self.agents.extend(created);
        report
    }

    /// `participantId, ticker, quantity`; sets the position
    pub fn read_positions<R: Read>(&self, source: R) -> LoadReport {
        for_each_row(source, "positions", 3, |row| {
            let Some(id) = parse_field::<ParticipantId>(row, 0, "participant id") else {
                return false;
            };
            let Some(quantity) = parse_field::<Quantity>(row, 2, "quantity") else {
                return false;
            };
            let ticker = &row[1];

            let Some(ledger) = self.exchange.ledger(id) else {
                warn!("Initial position: participant {} does not exist", id);
                return false;
            };
            if !self.exchange.is_listed(ticker) {
                warn!("Initial position: {} is not traded on this exchange", ticker);
                return false;
            }

            ledger.write().set_position(ticker, quantity);
            true
        })
    }

    /// `ticker, companyTitle, price`; the title is ignored
    pub fn read_prices<R: Read>(&self, source: R) -> LoadReport {
        for_each_row(source, "prices", 3, |row| {
            let Some(price) = parse_field::<Price>(row, 2, "price") else {
                return false;
            };
            self.exchange.set_price(&row[0], price);
            true
        })
    }

    /// `time, ticker, sentiment`
    pub fn read_events<R: Read>(&self, source: R) -> LoadReport {
        let mut rows = Vec::new();
        let parsed = for_each_row(source, "events", 3, |row| {
            let Some(time) = parse_field::<Tick>(row, 0, "time") else {
                return false;
            };
            rows.push(EventRow::new(time, &row[1], &row[2]));
            true
        });

        let securities: SecurityList = self.exchange.securities().into_iter().collect();
        let loaded = self.news.load(rows, &securities);

        LoadReport {
            loaded: loaded.loaded,
            skipped: parsed.skipped + loaded.skipped,
        }
    }

    /// `participantId, ticker, side, quantity, price, time`
    ///
    /// Rows naming an unknown participant or ticker are dropped quietly.
    pub fn read_orders<R: Read>(&self, source: R) -> LoadReport {
        for_each_row(source, "orders", 6, |row| {
            let (Some(id), Some(quantity), Some(price), Some(time)) = (
                parse_field::<ParticipantId>(row, 0, "participant id"),
                parse_field::<Quantity>(row, 3, "quantity"),
                parse_field::<Price>(row, 4, "price"),
                parse_field::<Tick>(row, 5, "time"),
            ) else {
                return false;
            };

            let ticker = &row[1];
            let (Some(ledger), Some(security)) =
                (self.exchange.ledger(id), self.exchange.security(ticker))
            else {
                trace!("Dropping order for participant {} in {}", id, ticker);
                return false;
            };

            let Ok(side) = Side::from_str(&row[2]) else {
                warn!("Order type not found (skipping): {:?}", row);
                return false;
            };

            let trader = ledger.read().owner().clone();
            let order = Order::new(
                self.ids.orders.next_id(),
                trader,
                security,
                side,
                price,
                quantity,
                time,
            );
            match self.exchange.submit_order(order) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Order rejected: {}", e);
                    false
                }
            }
        })
    }
}

impl Default for SimulationBootstrap {
    fn default() -> Self {
        Self::new()
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| BootstrapError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Feed each data row with at least `min_fields` fields to `handle`
///
/// `handle` returns whether the row was used. Short rows and rows the csv
/// reader cannot decode count as skipped.
fn for_each_row<R, F>(source: R, what: &str, min_fields: usize, mut handle: F) -> LoadReport
where
    R: Read,
    F: FnMut(&StringRecord) -> bool,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let mut report = LoadReport::default();
    for result in reader.records() {
        let used = match result {
            Ok(row) if row.len() >= min_fields => handle(&row),
            Ok(row) => {
                warn!("Skipping malformed {} line (too few attributes): {:?}", what, row);
                false
            }
            Err(e) => {
                warn!("Skipping unreadable {} line: {}", what, e);
                false
            }
        };

        if used {
            report.loaded += 1;
        } else {
            report.skipped += 1;
        }
    }

    debug!(
        "Read {} {} rows ({} skipped)",
        report.loaded, what, report.skipped
    );
    report
}

fn parse_field<T>(row: &StringRecord, index: usize, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let text = row.get(index)?;
    match text.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Skipping line {:?}: invalid {} {:?}: {}", row, name, text, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_ports::PriceSource;

    const SECURITIES: &str = "\
ticker,description
IBM,International Business Machines
AAPL,Apple Inc.
";

    fn bootstrap() -> SimulationBootstrap {
        let bootstrap = SimulationBootstrap::new();
        bootstrap.read_securities(SECURITIES.as_bytes());
        bootstrap
    }

    #[test]
    fn test_securities_skip_short_rows() {
        let bootstrap = SimulationBootstrap::new();
        let report =
            bootstrap.read_securities("ticker,description\n IBM , IBM Corp \nBROKEN\n".as_bytes());

        assert_eq!(report, LoadReport { loaded: 1, skipped: 1 });
        let ibm = bootstrap.exchange.security("IBM").unwrap();
        assert_eq!(ibm.description(), "IBM Corp");
    }

    #[test]
    fn test_accounts_create_agents_and_skip_bad_rows() {
        let mut bootstrap = bootstrap();
        let accounts = "\
title,kind,account,balance,style
Jane,Retail,Basic,10000,Aggressive
Broken,Retail,Basic
Hedge,Sovereign,Pro,500,Conservative
Gold,Retail,Platinum,500,Conservative
Money,Retail,Basic,lots,Aggressive
Fund,institutional,pro,250000,Conservative
Ace,Retail,Basic,100,conservative
";
        let report = bootstrap.read_accounts(accounts.as_bytes());

        assert_eq!(report, LoadReport { loaded: 3, skipped: 4 });
        assert_eq!(bootstrap.agents.len(), 3);

        let ids: Vec<u64> = bootstrap.agents.iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let styles: Vec<String> = bootstrap.agents.iter().map(|a| a.policy_name()).collect();
        assert_eq!(styles, vec!["Aggressive", "Conservative", "Aggressive"]);

        let fund = bootstrap.exchange.ledger(2).unwrap();
        assert_eq!(fund.read().owner().kind(), ParticipantKind::Institutional);
        assert_eq!(fund.read().balance(), 250_000);
        assert_eq!(bootstrap.news.subscriber_count(), 3);
    }

    #[test]
    fn test_positions_set_not_add() {
        let mut bootstrap = bootstrap();
        bootstrap.read_accounts("h\nJane,Retail,Basic,0,Aggressive\n".as_bytes());

        let report = bootstrap.read_positions(
            "pid,ticker,qty\n1,IBM,10\n1,IBM,4\n9,IBM,5\n1,MSFT,5\nx,IBM,1\n".as_bytes(),
        );

        assert_eq!(report, LoadReport { loaded: 2, skipped: 3 });
        assert_eq!(bootstrap.exchange.ledger(1).unwrap().read().position("IBM"), 4);
    }

    #[test]
    fn test_prices_ignore_title() {
        let bootstrap = bootstrap();
        let report =
            bootstrap.read_prices("t,title,p\nIBM,Whatever,100\nAAPL,Apple,n/a\n".as_bytes());

        assert_eq!(report, LoadReport { loaded: 1, skipped: 1 });
        assert_eq!(bootstrap.exchange.price("IBM"), Some(100));
        assert_eq!(bootstrap.exchange.price("AAPL"), None);
    }

    #[test]
    fn test_events_validate_sentiment_and_ticker() {
        let bootstrap = bootstrap();
        let events = "\
time,ticker,event
1,IBM,Good
2,IBM,Meh
3,MSFT,Bad
soon,IBM,Bad
4,AAPL,Bad
";
        let report = bootstrap.read_events(events.as_bytes());

        assert_eq!(report, LoadReport { loaded: 2, skipped: 3 });
        assert_eq!(bootstrap.news.pending(), 2);
    }

    #[test]
    fn test_orders_drop_unresolved_rows() {
        let mut bootstrap = bootstrap();
        bootstrap.read_accounts("h\nJane,Retail,Basic,0,Aggressive\n".as_bytes());

        let report = bootstrap.read_orders(
            "\
pid,ticker,side,qty,price,time
1,IBM,bid,10,99,0
1,IBM,ask,5,101,1
7,IBM,bid,1,1,0
1,MSFT,bid,1,1,0
1,IBM,BID,1,1,0
"
            .as_bytes(),
        );

        assert_eq!(report, LoadReport { loaded: 2, skipped: 3 });
        assert_eq!(bootstrap.exchange.bids().len(), 1);
        assert_eq!(bootstrap.exchange.asks().len(), 1);
        assert_eq!(bootstrap.ids.orders.issued(), 2);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let bootstrap = SimulationBootstrap::new();
        let err = bootstrap
            .load_securities(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, BootstrapError::Io { .. }));
    }
}
