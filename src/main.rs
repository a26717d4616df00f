// ==========================================
// 城市固体废弃物工具集 - 命令行入口
// ==========================================
// 子命令:
// - allocate: 两张表 → 分摊报告
// - classify: 一次性给出全部回答 → 评估
// - questionnaire: 逐题作答（stdin）
// ==========================================

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info};
use waste_toolkit::config::ConfigManager;
use waste_toolkit::engine::classification::{Assessment, Outcome};
use waste_toolkit::{
    logging, AllocationApi, AllocationReport, ClassificationApi, Material, Question,
    Questionnaire,
};

#[derive(Parser)]
#[command(name = "waste-toolkit")]
#[command(about = "Gestão de resíduos sólidos urbanos: alocação gravimétrica e classificação")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件路径（默认读取 WASTE_TOOLKIT_CONFIG）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 输出格式
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// 分摊：重量组分表 × 流量汇总表
    Allocate {
        /// Tabela 1（按单位类型的重量组分，.xlsx/.xls/.csv）
        #[arg(long)]
        composition: PathBuf,

        /// Tabela 2（按单位与 UF 的汇总，.xlsx/.xls/.csv）
        #[arg(long)]
        flows: PathBuf,
    },

    /// 分类：一次性给出回答（未给出的问题视为待答）
    Classify {
        /// 州名或 UF 代码
        #[arg(long)]
        region: String,

        /// 日产量（升/天）
        #[arg(long)]
        quantity: String,

        #[arg(long)]
        known_origin: Option<String>,

        #[arg(long)]
        listed_in_annex: Option<String>,

        #[arg(long)]
        hazard_trait: Option<String>,

        #[arg(long)]
        solubility_exceeds: Option<String>,
    },

    /// 逐题作答的分类问卷（从标准输入读取回答）
    Questionnaire {
        #[arg(long)]
        region: String,

        #[arg(long)]
        quantity: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigManager::load(path),
        None => ConfigManager::from_env(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("配置加载失败: {}", e);
            std::process::exit(2);
        }
    };

    match cli.format {
        OutputFormat::Json => logging::init_json(config.log_filter()),
        OutputFormat::Text => logging::init(config.log_filter()),
    }
    info!(version = waste_toolkit::VERSION, "{}", waste_toolkit::APP_NAME);

    let result = match cli.command {
        Commands::Allocate { composition, flows } => {
            run_allocate(&config, &composition, &flows, cli.format)
        }
        Commands::Classify {
            region,
            quantity,
            known_origin,
            listed_in_annex,
            hazard_trait,
            solubility_exceeds,
        } => {
            let answers: Vec<(Question, String)> = [
                (Question::KnownOrigin, known_origin),
                (Question::ListedInAnnex, listed_in_annex),
                (Question::HazardTrait, hazard_trait),
                (Question::SolubilityExceeds, solubility_exceeds),
            ]
            .into_iter()
            .filter_map(|(q, a)| a.map(|a| (q, a)))
            .collect();
            run_classify(&config, &region, &quantity, &answers, cli.format)
        }
        Commands::Questionnaire { region, quantity } => {
            run_questionnaire(&config, &region, &quantity, cli.format)
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("Erro ao processar os dados: {:#}", e);
        std::process::exit(1);
    }
}

fn run_allocate(
    config: &ConfigManager,
    composition: &PathBuf,
    flows: &PathBuf,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let api = AllocationApi::new(config)?;
    let report = api
        .allocate_files(composition, flows)
        .context("分摊失败")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }
    Ok(())
}

fn print_report(report: &AllocationReport) {
    println!("Total de Resíduos Processados (ton): {:.2}", report.total_processed);
    println!(
        "Linhas: {} (sem gravimetria: {})",
        report.results.len(),
        report.skipped_flow_rows
    );
    println!();

    for row in &report.results {
        println!("[{}] {}", row.region, row.unit_type);
        for (material, quantity) in &row.quantities {
            println!("    {:<28} {:>14.2}", material.label(), quantity);
        }
    }

    if !report.totals_by_region.is_empty() {
        println!();
        println!("Entulho por UF");
        for (region, totals) in &report.totals_by_region {
            let line: Vec<String> = totals
                .iter()
                .map(|(m, q): (&Material, &f64)| format!("{}={:.2}", m.label(), q))
                .collect();
            println!("    {:<4} {}", region, line.join("  "));
        }
    }
}

fn run_classify(
    config: &ConfigManager,
    region: &str,
    quantity: &str,
    answers: &[(Question, String)],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let api = ClassificationApi::with_config(config)?;
    let answers: Vec<(Question, &str)> = answers.iter().map(|(q, a)| (*q, a.as_str())).collect();
    let assessment = api.assess(region, quantity, &answers)?;
    print_assessment(&assessment, format)
}

fn run_questionnaire(
    config: &ConfigManager,
    region: &str,
    quantity: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let api = ClassificationApi::with_config(config)?;
    let daily_quantity = api.parse_daily_quantity(quantity)?;
    // 先解析地区，避免答完才报错
    let threshold = api.resolve_region(region)?;

    let mut questionnaire = Questionnaire::new();
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(question) = questionnaire.current() {
        print!("{} (sim/não): ", question.prompt());
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match api.parse_answer(&line?) {
            Ok(answer) => {
                questionnaire.answer(answer)?;
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    let assessment = api.classify(threshold.uf, daily_quantity, &questionnaire.answers())?;
    print_assessment(&assessment, format)
}

fn print_assessment(assessment: &Assessment, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(assessment)?),
        OutputFormat::Text => {
            let status = match assessment.generator_status {
                waste_toolkit::GeneratorStatus::LargeGenerator => "Grande gerador",
                waste_toolkit::GeneratorStatus::NotLargeGenerator => "Não é grande gerador",
            };
            println!(
                "{} ({} L/dia, limite {} L/dia em {})",
                status,
                assessment.daily_quantity,
                assessment.region.liters_per_day,
                assessment.region.name
            );
            match assessment.outcome {
                Outcome::Classified(classification) => println!("{}", classification.label()),
                Outcome::Pending(question) => println!("Pendente: {}", question.prompt()),
            }
        }
    }
    Ok(())
}
