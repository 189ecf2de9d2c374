//! CLI entry point for blogfront

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogfront::commands::new::Body;

#[derive(Parser)]
#[command(name = "blogfront")]
#[command(version)]
#[command(about = "A small Markdown blog front-end with a local post cache", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        #[arg(short, long)]
        title: Option<String>,

        /// Read the markdown body from a file
        #[arg(short, long, conflicts_with = "body")]
        file: Option<PathBuf>,

        /// Markdown body
        body: Option<String>,

        /// Write the updated post list here instead of the downloads folder
        #[arg(short, long)]
        save_to: Option<PathBuf>,
    },

    /// List posts
    List,

    /// Print the rendered HTML of one post
    Show {
        /// Post id
        id: String,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,

        /// Write the post list here when a post is created
        #[arg(short, long)]
        save_to: Option<PathBuf>,
    },

    /// Clear the cached post list
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogfront=debug,tower_http=debug,info"
    } else {
        "blogfront=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            blogfront::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New {
            title,
            file,
            body,
            save_to,
        } => {
            let blog = blogfront::Blog::new(&base_dir)?;
            let body = match (&file, &body) {
                (Some(path), _) => Body::File(path),
                (None, Some(text)) => Body::Text(text),
                (None, None) => anyhow::bail!("Provide the post body or --file"),
            };
            blogfront::commands::new::create_post(&blog, title.as_deref(), body, save_to.as_deref())
                .await?;
        }

        Commands::List => {
            let blog = blogfront::Blog::new(&base_dir)?;
            blogfront::commands::list::run(&blog).await?;
        }

        Commands::Show { id } => {
            let blog = blogfront::Blog::new(&base_dir)?;
            let html = blogfront::commands::show::render_post(&blog, &id).await?;
            println!("{}", html);
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
            save_to,
        } => {
            let blog = blogfront::Blog::new(&base_dir)?;
            let app = blog.app(save_to.as_deref());

            tracing::info!("Starting server at http://{}:{}", ip, port);
            blogfront::server::start(&blog, app, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let blog = blogfront::Blog::new(&base_dir)?;
            blogfront::commands::clean::run(&blog)?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("blogfront version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
