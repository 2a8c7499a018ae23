use colored::Colorize;
use throttle_cloud::aws;
use throttle_cloud::Resource;

pub fn handle(stack: &str) -> anyhow::Result<()> {
    println!("{}", "Validating stack configuration...".blue());

    let project_root = match throttle_config::find_project_root() {
        Ok(root) => root,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ Project root not found".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Project root: {}",
        project_root.display().to_string().cyan()
    );

    let result = throttle_core::load_stack_from_root(&project_root, stack)
        .and_then(|config| throttle_core::resolve(&config))
        .and_then(|resolved| {
            let declaration = resolved.to_declaration()?;
            Ok((resolved, declaration))
        });

    let (resolved, declaration) = match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ Configuration error".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", "✓ Stack configuration is valid".green().bold());
    println!();
    println!("Summary:");
    println!("  Project: {}", resolved.project.cyan());
    println!("  Stack: {}", resolved.stack.to_string().cyan());
    println!("  Domain: {}", resolved.domain.full_domain.cyan());
    if resolved.domain.is_prod() {
        println!("  Delegation: none (apex zone)");
    } else {
        println!("  Delegation: NS record in parent zone");
    }
    println!(
        "  CDN aliases: {}",
        resolved.resources.distribution.props.aliases.join(", ")
    );

    let summary = declaration.summary();
    println!("  Resources: {}", summary.total);
    for (label, count) in [
        (aws::Bucket::KIND, summary.count(aws::Bucket::TYPE)),
        (aws::BucketObject::KIND, summary.count(aws::BucketObject::TYPE)),
        (aws::Distribution::KIND, summary.count(aws::Distribution::TYPE)),
        (aws::HostedZone::KIND, summary.count(aws::HostedZone::TYPE)),
        (aws::Record::KIND, summary.count(aws::Record::TYPE)),
        (aws::DatabaseInstance::KIND, summary.count(aws::DatabaseInstance::TYPE)),
    ] {
        if count > 0 {
            println!("    - {} × {}", label.cyan(), count);
        }
    }
    println!("  Exports: {}", summary.exports);

    let asset = &resolved.resources.index_object.props.source.path;
    if !project_root.join(asset).exists() {
        println!();
        println!(
            "{} index asset not found: {}",
            "⚠".yellow(),
            asset.yellow()
        );
    }

    Ok(())
}
