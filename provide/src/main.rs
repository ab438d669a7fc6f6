use clap::{Args, Parser, Subcommand};
use miette::{MietteHandlerOpts, Report, Result};
use provide_parser::parse_declaration;
use provide_resolver::{Callable, ContextConfig, ResolutionContext, Value};
use std::process;

#[derive(Parser)]
#[command(
    name = "provide",
    version,
    about = "Resolve callable parameters from named, typed values",
    long_about = "Reads a callable's parameter declaration, looks each parameter up by name among registered values, and converts it through the rule for its declared type."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ConfigArgs {
    /// Character separating a parameter name from its type tag
    #[arg(long, value_name = "CHAR", default_value_t = ContextConfig::DEFAULT_TYPE_DELIMITER)]
    delimiter: char,

    /// Type tag assumed when a parameter declares none
    #[arg(long, value_name = "TYPE", default_value = ContextConfig::DEFAULT_TYPE)]
    default_type: String,
}

impl ConfigArgs {
    fn to_config(&self) -> ContextConfig {
        ContextConfig::default()
            .with_type_delimiter(self.delimiter)
            .with_default_type(self.default_type.clone())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show how the parameters of a callable declaration are read
    Signature {
        #[command(flatten)]
        config: ConfigArgs,

        /// Declaration text, e.g. 'function (data:json, retries = 3) {}'
        #[arg(value_name = "DECLARATION")]
        declaration: String,
    },

    /// Resolve a parameter declaration or a callable against values
    Resolve {
        #[command(flatten)]
        config: ConfigArgs,

        /// Register a value; text that is not JSON is taken as a string
        #[arg(short, long = "value", value_name = "NAME=JSON", value_parser = parse_assignment)]
        values: Vec<(String, String)>,

        /// Give a registered value an explicit type tag
        #[arg(short = 't', long = "cell-type", value_name = "NAME=TYPE", value_parser = parse_assignment)]
        cell_types: Vec<(String, String)>,

        /// Do not register the standard conversion rules
        #[arg(long)]
        no_standard_adapters: bool,

        /// Parameter declaration such as 'port:number', or a callable
        /// declaration such as '(host, port:number) => 0'
        #[arg(value_name = "TARGET")]
        target: String,
    },
}

fn main() {
    setup_miette_handler();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Some(Commands::Signature {
            config,
            declaration,
        }) => handle_signature_command(&config, &declaration),
        Some(Commands::Resolve {
            config,
            values,
            cell_types,
            no_standard_adapters,
            target,
        }) => handle_resolve_command(&config, values, &cell_types, no_standard_adapters, &target),
        None => {
            // No subcommand provided, show help
            Cli::parse_from(["provide", "--help"]);
            Ok(())
        }
    };

    if let Err(report) = outcome {
        eprintln!("{:?}", report);
        process::exit(1);
    }
}

fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .color(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

fn parse_assignment(input: &str) -> std::result::Result<(String, String), String> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got `{}`", input)),
    }
}

/// Only the text before a default clause decides, so `retries = (3)` stays
/// a parameter. An `=` opening `=>` is an arrow, not a default.
fn is_callable_target(target: &str) -> bool {
    match target.find('=') {
        Some(index) if target[index..].starts_with("=>") => true,
        Some(index) => target[..index].contains('('),
        None => target.contains('('),
    }
}

fn report_warnings(context: &mut ResolutionContext) {
    for warning in context.take_warnings() {
        eprintln!("{:?}", Report::new(warning));
    }
}

fn handle_signature_command(config: &ConfigArgs, declaration: &str) -> Result<()> {
    let signature = parse_declaration(declaration)?;

    let mut context = ResolutionContext::with_config(config.to_config());
    let callable = Callable::from_declaration(declaration, |_: &[Value]| Value::Undefined);
    let descriptor = context.describe(&callable)?;
    report_warnings(&mut context);

    let name = signature.name.as_deref().unwrap_or("<anonymous>");
    let prefix = if signature.is_async { "async " } else { "" };
    println!(
        "{}{} {} ({} parameters)",
        prefix,
        signature.form,
        name,
        descriptor.arity()
    );

    for (index, parameter) in descriptor.parameters.iter().enumerate() {
        let mut line = format!(
            "  {}: {} type={}",
            index,
            parameter.name(),
            parameter.declared_type()
        );
        if let Some(expression) = parameter.default_expression() {
            line.push_str(&format!(" default={}", expression));
        }
        if parameter.is_variadic() {
            line.push_str(" variadic");
        }
        println!("{}", line);
    }

    Ok(())
}

fn handle_resolve_command(
    config: &ConfigArgs,
    values: Vec<(String, String)>,
    cell_types: &[(String, String)],
    no_standard_adapters: bool,
    target: &str,
) -> Result<()> {
    let mut context = ResolutionContext::with_config(config.to_config());
    if !no_standard_adapters {
        context = context.with_standard_adapters();
    }

    for (name, text) in values {
        let value = Value::parse_literal(&text).unwrap_or_else(|_| Value::String(text.clone()));
        // Last --cell-type for a name wins
        let type_tag = cell_types
            .iter()
            .rev()
            .find(|(cell, _)| *cell == name)
            .map(|(_, type_tag)| type_tag.as_str());
        context.add_parameter(name, value, type_tag);
    }

    let target = if is_callable_target(target) {
        Value::Function(Callable::from_declaration(target, |arguments: &[Value]| {
            Value::List(arguments.to_vec())
        }))
    } else {
        Value::from(target)
    };

    let result = context.evaluate(&target);
    report_warnings(&mut context);

    println!("{}", result?.to_display_string());
    Ok(())
}
