// Demo driver: a minimal tokenizer feeding a fixed option set.
//
//   optdemo --name x --port 1..3 -D Key=v --tag a --tag b
//   OPTDEMO_NAME=x OPTDEMO_QUIET=true optdemo -v

use std::process::ExitCode;

use getoptions::*;

type DemoResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn options() -> Vec<Opt> {
    vec![
        Opt::new("verbose", Kind::Bool)
            .set_alias(&["v"])
            .set_description("Log option handling to stderr"),
        Opt::new("quiet", Kind::Bool)
            .set_alias(&["q"])
            .set_env_var("OPTDEMO_QUIET")
            .set_description("Print nothing on success"),
        Opt::new("name", Kind::String)
            .set_alias(&["n"])
            .set_env_var("OPTDEMO_NAME")
            .set_required("")
            .set_description("Who to greet"),
        Opt::new("color", Kind::String)
            .set_string("auto")
            .set_default_str("auto")
            .set_valid_values(&["auto", "always", "never"])
            .set_help_arg_name("when"),
        Opt::new("count", Kind::Int)
            .set_alias(&["c"])
            .set_int(1)
            .set_default_str("1"),
        Opt::new("ratio", Kind::Float).set_env_var("OPTDEMO_RATIO"),
        Opt::new("tag", Kind::StringList).set_max_args(8),
        Opt::new("port", Kind::IntList).set_help_arg_name("port|lo..hi"),
        Opt::new("define", Kind::StringMap)
            .set_alias(&["D"])
            .set_map_keys_to_lower(),
    ]
}

fn find<'a>(opts: &'a mut [Opt], alias: &str) -> Option<&'a mut Opt> {
    opts.iter_mut()
        .find(|o| o.aliases().iter().any(|a| a == alias))
}

/// Walk `args`, handing each option invocation to its `Opt`. Returns the
/// operands.
fn tokenize(opts: &mut [Opt], args: &[String]) -> DemoResult<Vec<String>> {
    let mut operands = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == "--" {
            operands.extend(iter.by_ref().cloned());
            break;
        }
        let Some(spec) = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')) else {
            operands.push(arg.clone());
            continue;
        };
        if spec.is_empty() {
            operands.push(arg.clone());
            continue;
        }
        let (alias, inline) = match spec.split_once('=') {
            Some((a, v)) => (a, Some(v)),
            None => (spec, None),
        };

        let opt = find(opts, alias).ok_or_else(|| format!("unknown option '{}'", arg))?;
        opt.set_called(alias);
        if opt.kind() == Kind::Bool {
            opt.save(&[""])?;
            continue;
        }
        let value = match inline {
            Some(v) => v.to_string(),
            None => iter
                .next()
                .cloned()
                .ok_or_else(|| format!("missing argument for option '{}'", alias))?,
        };
        opt.save(&[value.as_str()])?;
    }
    Ok(operands)
}

/// Options never given on the command line take their environment variable.
fn apply_env(opts: &mut [Opt]) -> DemoResult<()> {
    for opt in opts.iter_mut() {
        if opt.called() || opt.env_var().is_empty() {
            continue;
        }
        let Ok(value) = std::env::var(opt.env_var()) else {
            continue;
        };
        let var = opt.env_var().to_string();
        if opt.kind() == Kind::Bool {
            let want = convert::to_bool(&value)
                .ok_or_else(|| format!("{}: expected a boolean, got '{}'", var, value))?;
            if want != opt.bool() {
                opt.set_called(&var);
                opt.save(&[""])?;
            }
        } else {
            opt.set_called(&var);
            opt.save(&[value.as_str()])?;
        }
    }
    Ok(())
}

fn show(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::String(s) => format!("{:?}", s),
        Value::Int(n) => n.to_string(),
        Value::Float64(f) => f.to_string(),
        Value::StringSlice(v) => format!("{:?}", v),
        Value::IntSlice(v) => format!("{:?}", v),
        Value::StringMap(m) => {
            let mut pairs: Vec<_> = m.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            pairs.sort();
            format!("{{{}}}", pairs.join(", "))
        }
    }
}

fn run(args: &[String]) -> DemoResult<()> {
    let mut opts = options();
    let operands = tokenize(&mut opts, args)?;
    apply_env(&mut opts)?;
    for opt in &opts {
        opt.check_required()?;
    }

    let quiet = opts.iter().any(|o| o.name() == "quiet" && o.bool());
    if quiet {
        return Ok(());
    }

    sort(&mut opts);
    let width = opts.iter().map(|o| o.help_synopsis().len()).max().unwrap_or(0);
    for opt in &opts {
        println!(
            "{:width$}  {}",
            opt.help_synopsis(),
            show(&opt.value()),
            width = width
        );
    }
    if !operands.is_empty() {
        println!("operands: {:?}", operands);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if verbose {
            tracing::Level::TRACE
        } else {
            tracing::Level::WARN
        })
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("optdemo: {}", e);
            ExitCode::FAILURE
        }
    }
}
