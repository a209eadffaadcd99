use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use noughts::{
    logging, Address, ClientConfig, GameClient, GameSession, Kind, Position, QueryState,
    RpcClient, TurnIndicator, Winner,
};

#[derive(Parser)]
#[command(name = "noughts")]
#[command(about = "Play on-chain tic-tac-toe from the terminal")]
#[command(version)]
struct Cli {
    /// Configuration file path (defaults to built-in networks)
    #[arg(short, long)]
    config: Option<String>,

    /// Network to connect to
    #[arg(short, long)]
    network: Option<String>,

    /// Address of the connected player; omit to spectate
    #[arg(short, long)]
    signer: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a game and print its board, turn and outcome
    Show { id: String },
    /// Create a new game between two players
    New {
        /// Game variant: shared or owned
        kind: String,
        /// Address of the player controlling X
        x: String,
        /// Address of the player controlling O
        o: String,
    },
    /// Place a mark on a game
    Move { id: String, row: u8, col: u8 },
    /// Delete a finished game
    Burn { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(err) = logging::init_from_env() {
        eprintln!("failed to initialize logging: {}", err);
    }

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path))?,
        None => ClientConfig::default(),
    };

    let network_name = cli
        .network
        .clone()
        .unwrap_or_else(|| config.default_network.clone());
    let network = config.network(&network_name)?;
    let package = network.package_id()?.clone();

    let signer = cli
        .signer
        .as_deref()
        .map(Address::parse)
        .transpose()
        .context("parsing signer address")?;

    let rpc = RpcClient::new(network, &config)?;
    let client = GameClient::new(rpc, package, signer);

    match cli.command {
        Command::Show { id } => {
            let id = Address::parse(&id).context("parsing game ID")?;
            let explorer = network.explorer_url(&id);
            let mut session = GameSession::new(client, id);
            session.refresh().await;
            show(&session, explorer.as_deref())?;
        }

        Command::New { kind, x, o } => {
            let kind: Kind = kind.parse()?;
            let x = Address::parse(&x).context("parsing X address")?;
            let o = Address::parse(&o).context("parsing O address")?;

            let id = client.new_game(kind, &x, &o).await?;
            println!("created game {}", id);
        }

        Command::Move { id, row, col } => {
            let id = Address::parse(&id).context("parsing game ID")?;
            let position = Position::new(row, col)?;

            let mut session = GameSession::new(client, id);
            session.refresh().await;
            if let Some(err) = session.game().error() {
                bail!("game {}: {}", session.id(), err);
            }

            session.place_mark(position).await?;
            show(&session, None)?;
        }

        Command::Burn { id } => {
            let id = Address::parse(&id).context("parsing game ID")?;

            let mut session = GameSession::new(client, id);
            session.refresh().await;
            if let Some(err) = session.game().error() {
                bail!("game {}: {}", session.id(), err);
            }

            let digest = session.burn().await?;
            println!("deleted game in transaction {}", digest);
        }
    }

    Ok(())
}

fn show<R: noughts::RpcApi>(session: &GameSession<R>, explorer: Option<&str>) -> Result<()> {
    let game = match session.game() {
        QueryState::Ready(game) => game,
        QueryState::Failed(err) => bail!("game {}: {}", session.id(), err),
        QueryState::Pending => bail!("game {}: state not fetched", session.id()),
    };

    print!("{}", game.board);
    println!();

    match session.winner() {
        Some(Winner::None) | None => match session.turn_indicator() {
            Some(TurnIndicator::Yours) => println!("your turn"),
            Some(TurnIndicator::Theirs) => println!("their turn"),
            Some(TurnIndicator::Spectating) | None => println!("spectating"),
        },
        Some(Winner::Draw) => println!("draw"),
        Some(Winner::You) => println!("you won"),
        Some(Winner::Them) => println!("they won"),
        Some(Winner::X) => println!("X won"),
        Some(Winner::O) => println!("O won"),
    }

    if let Some(err) = session.trophy().error() {
        println!("(could not fetch outcome: {})", err);
    }

    if let Some(url) = explorer {
        println!("explorer: {}", url);
    }

    Ok(())
}
