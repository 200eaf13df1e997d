//! Line-oriented console for driving an inventory by hand.
//!
//! Reads one command per line from stdin. Run with `RUST_LOG=debug` to watch every
//! deposit and drag transition.

use anyhow::{anyhow, bail, Context, Result};
use glam::Vec2;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;
use tile_inventory::{
    DroppedItem, Inventory, InventoryConfig, InventoryInputHandler, InventoryKey, InventorySnapshot,
    InventoryUI, ItemRegistry, RecipeRegistry, SlotView,
};

const VIEW_WIDTH: f32 = 960.0;
const VIEW_HEIGHT: f32 = 640.0;

const HELP: &str = "\
commands:
  give <item> [count]   deposit items (count defaults to 1)
  craft <recipe>        craft by recipe id
  recipes               list recipes, * marks craftable ones
  click <x> <y>         primary click at screen position
  key <k>               press a key: 1-9, e, esc
  scroll <delta>        mouse wheel over the hotbar
  toggle                open or close the panel
  drop                  release the held stack at the player
  cancel                put the held stack back
  use [count]           consume from the selected hotbar slot
  info <slot>           tooltip for a slot
  show                  print slots, hotbar and held stack
  save <path>           write a snapshot
  load <path>           restore a snapshot
  quit";

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    items: Option<PathBuf>,
    recipes: Option<PathBuf>,
}

fn parse_args() -> Result<Options> {
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let slot = match arg.as_str() {
            "--config" => &mut options.config,
            "--items" => &mut options.items,
            "--recipes" => &mut options.recipes,
            other => bail!("unknown argument: {}", other),
        };
        let value = args.next().ok_or_else(|| anyhow!("{} needs a path", arg))?;
        *slot = Some(PathBuf::from(value));
    }
    Ok(options)
}

struct Console {
    inventory: Inventory,
    input: InventoryInputHandler,
    recipes: RecipeRegistry,
    world: Vec<DroppedItem>,
    player: Vec2,
}

impl Console {
    fn new(options: &Options) -> Result<Self> {
        let config = match &options.config {
            Some(path) => InventoryConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => InventoryConfig::default(),
        };
        let items = match &options.items {
            Some(path) => ItemRegistry::load(path)
                .with_context(|| format!("loading items {}", path.display()))?,
            None => ItemRegistry::default(),
        }
        .with_default_max_stack(config.default_max_stack);
        let recipes = match &options.recipes {
            Some(path) => RecipeRegistry::load(path)
                .with_context(|| format!("loading recipes {}", path.display()))?,
            None => RecipeRegistry::with_defaults(),
        };

        let layout = config.layout();
        let ui = InventoryUI::new(
            config.panel.clone(),
            layout.general_count,
            layout.len(),
            VIEW_WIDTH,
            VIEW_HEIGHT,
        );
        let mut inventory = Inventory::from_config(&config, Rc::new(items))?;
        inventory.set_hotbar_observer(|view, selected| {
            log::debug!("Hotbar: {} | selected {}", format_row(view), selected + 1);
        });

        Ok(Self {
            inventory,
            input: InventoryInputHandler::new(ui),
            recipes,
            world: Vec::new(),
            player: Vec2::new(VIEW_WIDTH / 2.0, VIEW_HEIGHT / 2.0),
        })
    }

    /// Run one command; returns false on `quit`
    fn execute(&mut self, line: &str) -> Result<bool> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            return Ok(true);
        };

        match command {
            "give" | "/give" => {
                let item = args.first().context("usage: give <item> [count]")?;
                let count = parse_or(args.get(1), 1)?;
                let leftover = self.inventory.add_item(*item, count)?;
                println!("gave {} x{}", item, count - leftover);
                if leftover > 0 {
                    println!("inventory full, {} lost", leftover);
                }
            }
            "craft" => {
                let id = args.first().context("usage: craft <recipe>")?;
                let recipe = self
                    .recipes
                    .get(id)
                    .with_context(|| format!("no recipe named '{}'", id))?;
                println!("{:?}", self.inventory.craft(recipe)?);
            }
            "recipes" => {
                for recipe in self.recipes.iter() {
                    let mark = if self.inventory.can_craft(recipe) { '*' } else { ' ' };
                    let needs: Vec<String> = recipe
                        .ingredients()
                        .iter()
                        .map(|i| format!("{} x{}", i.item_id, i.count))
                        .collect();
                    println!(
                        "{} {:<10} {} -> {} x{}",
                        mark,
                        recipe.id(),
                        needs.join(", "),
                        recipe.output().item_id,
                        recipe.output().count
                    );
                }
            }
            "click" => {
                let x: f32 = parse(args.first(), "usage: click <x> <y>")?;
                let y: f32 = parse(args.get(1), "usage: click <x> <y>")?;
                let action = self.input.handle_mouse_down(
                    Vec2::new(x, y),
                    self.player,
                    &mut self.inventory,
                    &mut self.world,
                )?;
                println!("{:?}", action);
            }
            "key" => {
                let key = match args.first().copied() {
                    Some("e") | Some("E") => InventoryKey::KeyE,
                    Some("esc") | Some("escape") => InventoryKey::Escape,
                    Some(k) => InventoryKey::Digit(k.parse().context("usage: key <1-9|e|esc>")?),
                    None => bail!("usage: key <1-9|e|esc>"),
                };
                println!("{:?}", self.input.handle_key(key, &mut self.inventory)?);
            }
            "scroll" => {
                let delta: f32 = parse(args.first(), "usage: scroll <delta>")?;
                println!("{:?}", self.input.handle_scroll(delta, &mut self.inventory));
            }
            "toggle" => {
                println!("{:?}", self.input.handle_key(InventoryKey::KeyE, &mut self.inventory)?);
            }
            "drop" => {
                let dropped = self.inventory.drop_outside(&mut self.world, self.player)?;
                println!("dropped {} x{} at the player", dropped.item_id, dropped.count);
            }
            "cancel" => {
                let leftover = self.inventory.cancel_drag()?;
                if leftover > 0 {
                    println!("{} still held, no room", leftover);
                }
            }
            "use" => {
                let count = parse_or(args.first(), 1)?;
                match self.inventory.consume_selected(count)? {
                    Some(stack) => println!("used {} x{}", stack.item_id, stack.count),
                    None => println!("selected slot is empty"),
                }
            }
            "info" => {
                let index: usize = parse(args.first(), "usage: info <slot>")?;
                match self.inventory.describe(index) {
                    Some(tooltip) => println!("{} x{}: {}", tooltip.name, tooltip.count, tooltip.description),
                    None => println!("slot {} is empty", index),
                }
            }
            "show" => self.show(),
            "save" => {
                let path = args.first().context("usage: save <path>")?;
                InventorySnapshot::capture(&self.inventory).save(path)?;
                println!("saved to {}", path);
            }
            "load" => {
                let path = args.first().context("usage: load <path>")?;
                InventorySnapshot::load(path)?.apply(&mut self.inventory)?;
                println!("loaded {}", path);
            }
            "help" => println!("{}", HELP),
            "quit" | "exit" => return Ok(false),
            other => println!("unknown command '{}', try help", other),
        }
        Ok(true)
    }

    fn show(&self) {
        let layout = self.inventory.layout();
        let columns = self.input.ui().layout().columns.max(1);
        let views = self.inventory.snapshot();

        println!("panel {}", if self.input.is_open() { "open" } else { "closed" });
        for (row, chunk) in views[layout.general_range()].chunks(columns).enumerate() {
            println!("{:>3}: {}", row * columns, format_row(chunk));
        }
        println!("hot: {}", format_row(self.inventory.hotbar().view()));
        println!("selected: {}", self.inventory.selected_hotbar_index() + 1);
        if let Some(held) = self.inventory.held() {
            println!("held: {} x{}", held.item_id, held.count);
        }
        if !self.world.is_empty() {
            println!("on the ground: {} stacks", self.world.len());
        }
    }
}

fn format_row(views: &[SlotView]) -> String {
    views
        .iter()
        .map(|view| match &view.item_id {
            Some(id) => format!("{}x{}", id, view.count),
            None => "-".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse<T: std::str::FromStr>(arg: Option<&&str>, usage: &str) -> Result<T> {
    arg.and_then(|a| a.parse().ok())
        .ok_or_else(|| anyhow!("{}", usage))
}

fn parse_or(arg: Option<&&str>, default: u32) -> Result<u32> {
    match arg {
        Some(a) => a.parse().with_context(|| format!("'{}' is not a count", a)),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let options = parse_args()?;
    let mut console = Console::new(&options)?;
    log::info!(
        "Inventory console ready: {} slots, {} recipes",
        console.inventory.len(),
        console.recipes.len()
    );
    println!("{}", HELP);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        match console.execute(&line) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("error: {:#}", e),
        }
        stdout.flush().context("flushing stdout")?;
    }

    log::info!("Session over, {} stacks dropped in the world", console.world.len());
    Ok(())
}
