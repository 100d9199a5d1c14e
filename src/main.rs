use clap::Parser;
use dialoguer::Confirm;
use nota_credito::cli::{ClientAction, Cli, Commands, SupplierAction, TemplateAction};
use nota_credito::config::Config;
use nota_credito::error::{NotaError, Result, ValidationError};
use nota_credito::generator::{self, inspect};
use nota_credito::validation::{self, NoteForm};
use nota_credito::{printer, AppContext};
use nota_credito_common::collection::{filter_clients, find};
use nota_credito_common::export::placeholder::write_placeholder_template;
use nota_credito_common::{format_currency, format_date, Client, DescriptionTemplate, Supplier};

fn confirm(prompt: &str, skip: bool) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| NotaError::CliExecution(e.to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load()?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    let ctx = AppContext::new(config);

    match cli.command {
        Commands::Clients { action } => match action {
            ClientAction::List { search } => {
                let clients = ctx.clients.load();
                let found = filter_clients(&clients, search.as_deref().unwrap_or(""));
                if found.is_empty() {
                    println!("Nenhum cliente encontrado.");
                }
                for client in found {
                    println!("{}", client.display_label());
                }
            }
            ClientAction::Add { code, name } => {
                ctx.clients.add(Client::new(code.as_str(), name))?;
                println!("✔ Cliente {} cadastrado.", code.trim());
            }
            ClientAction::Edit { code, new_code, name } => {
                let current = ctx
                    .clients
                    .find(&code)
                    .ok_or_else(|| ValidationError::ClientNotFound(code.clone()))?;
                let updated = Client::new(
                    new_code.unwrap_or(current.code),
                    name.unwrap_or(current.name),
                );
                let label = updated.code.trim().to_string();
                ctx.clients.update(&code, updated)?;
                println!("✔ Cliente {} atualizado.", label);
            }
            ClientAction::Delete { code, yes } => {
                let client = ctx
                    .clients
                    .find(&code)
                    .ok_or_else(|| ValidationError::ClientNotFound(code.clone()))?;
                let prompt = format!("Tem certeza que deseja excluir o cliente {}?", client.display_label());
                if confirm(&prompt, yes)? {
                    ctx.clients.remove(&code)?;
                    println!("✔ Cliente {} excluído com sucesso.", code);
                }
            }
        },

        Commands::Suppliers { action } => match action {
            SupplierAction::List => {
                for supplier in ctx.suppliers.load() {
                    let path = ctx.config.supplier_template_path(&supplier.template_file);
                    let mark = if path.exists() { "" } else { " (modelo não encontrado)" };
                    println!("{} → {}{}", supplier.name, path.display(), mark);
                }
            }
            SupplierAction::Add { name, template } => {
                ctx.suppliers.add(Supplier::new(name.as_str(), template))?;
                println!("✔ Fornecedor {} cadastrado.", name.trim());
            }
            SupplierAction::Edit { name, new_name, template } => {
                let current = ctx
                    .suppliers
                    .find(&name)
                    .ok_or_else(|| ValidationError::SupplierNotFound(name.clone()))?;
                let updated = Supplier::new(
                    new_name.unwrap_or(current.name),
                    template.unwrap_or(current.template_file),
                );
                ctx.suppliers.update(&name, updated)?;
                println!("✔ Fornecedor atualizado.");
            }
            SupplierAction::Delete { name, yes } => {
                let prompt = format!("Excluir o fornecedor {}?", name);
                if confirm(&prompt, yes)? {
                    ctx.suppliers.remove(&name)?;
                    println!("✔ Fornecedor {} excluído.", name);
                }
            }
        },

        Commands::Templates { action } => match action {
            TemplateAction::List => {
                for template in ctx.templates.load() {
                    println!("[{}]\n  {}", template.name, template.text);
                }
            }
            TemplateAction::Add { name, text } => {
                ctx.templates.add(DescriptionTemplate::new(name.as_str(), text))?;
                println!("✔ Modelo {} cadastrado.", name.trim());
            }
            TemplateAction::Edit { name, new_name, text } => {
                let current = ctx
                    .templates
                    .find(&name)
                    .ok_or_else(|| ValidationError::DescriptionTemplateNotFound(name.clone()))?;
                let updated = DescriptionTemplate::new(
                    new_name.unwrap_or(current.name),
                    text.unwrap_or(current.text),
                );
                ctx.templates.update(&name, updated)?;
                println!("✔ Modelo atualizado.");
            }
            TemplateAction::Delete { name, yes } => {
                let prompt = format!("Excluir o modelo {}?", name);
                if confirm(&prompt, yes)? {
                    ctx.templates.remove(&name)?;
                    println!("✔ Modelo {} excluído.", name);
                }
            }
        },

        Commands::Generate { client, amount, date, invoice, description, template, supplier, print } => {
            println!("🧾 nota-credito - Geração de Nota de Crédito\n");

            let mut state = ctx.state.load();

            let description = match (description, template) {
                (Some(text), _) => text,
                (None, Some(name)) => {
                    let templates = ctx.templates.load();
                    find(&templates, &name)
                        .map(|t| t.text.clone())
                        .ok_or(ValidationError::DescriptionTemplateNotFound(name))?
                }
                (None, None) => state.last_description.clone(),
            };

            let form = NoteForm {
                date: format_date(&date.unwrap_or_else(validation::today)),
                invoice_number: invoice.unwrap_or_else(|| state.next_invoice_number.to_string()),
                client_code: Some(client),
                description,
                amount: format_currency(&amount),
                supplier,
            };
            let request = form.validate(&ctx.clients.load(), &ctx.suppliers.load())?;

            println!("- Cliente: {}", request.client.display_label());
            println!("- Data: {}  Fatura: {}  Valor: R$ {}", request.date, request.invoice_number, request.amount);

            let report = generator::generate_note(&ctx, &request, &mut state)?;
            for skip in &report.skipped {
                eprintln!("⚠ Célula {} ignorada ({})", skip.cell, skip.reason);
            }
            println!("✔ Nota salva em: {}", report.output_path.display());
            println!("✔ Próxima fatura: {}", state.next_invoice_number);

            if print {
                if let Err(e) = printer::print_file(&report.output_path, &ctx.config) {
                    eprintln!("⚠ {}\n  Tente abrir o arquivo manualmente.", e);
                }
            }
        }

        Commands::Print { file, yes } => {
            let path = match file {
                Some(path) => path,
                None => printer::last_note(&ctx.output_dir())?,
            };
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if confirm(&format!("Deseja enviar para impressão o arquivo {}?", name), yes)? {
                match printer::print_file(&path, &ctx.config) {
                    Ok(()) => println!("✔ Comando de impressão enviado. Verifique a fila de impressão."),
                    Err(e) => eprintln!("⚠ {}\n  Tente abrir o arquivo manualmente.", e),
                }
            }
        }

        Commands::Show { file } => {
            let contents = inspect::inspect_note(&file)?;
            println!("Planilha: {}", contents.sheet_name);
            for field in &contents.fields {
                println!(
                    "  {:>4}  {:<24} {}",
                    field.cell,
                    field.field.label(),
                    field.value.as_deref().unwrap_or("-")
                );
            }
        }

        Commands::State => {
            let state = ctx.state.load();
            println!("Próxima fatura: {}", state.next_invoice_number);
            println!("Última descrição: {}", state.last_description);
        }

        Commands::InitTemplate { output, force } => {
            let path = output.unwrap_or_else(|| ctx.config.template_path());
            if path.exists() && !force {
                return Err(NotaError::Config(format!(
                    "{} já existe (use --force para sobrescrever)",
                    path.display()
                )));
            }
            write_placeholder_template(&path)?;
            println!("✔ Modelo criado: {}", path.display());
            println!("  AVISO: substitua este arquivo pelo seu modelo real.");
        }

        Commands::Config {
            show,
            set_data_dir,
            set_output_dir,
            set_template,
            set_strict_cells,
            set_dev_mode,
            set_print_command,
        } => {
            let mut config = Config::load()?;
            let mut changed = false;

            if let Some(dir) = set_data_dir {
                config.data_dir = dir;
                changed = true;
            }
            if let Some(dir) = set_output_dir {
                config.output_dir = Some(dir);
                changed = true;
            }
            if let Some(template) = set_template {
                config.template_file = template;
                changed = true;
            }
            if let Some(strict) = set_strict_cells {
                config.strict_cells = strict;
                changed = true;
            }
            if let Some(dev) = set_dev_mode {
                config.dev_mode = dev;
                changed = true;
            }
            if let Some(command) = set_print_command {
                config.print_command = if command.trim().is_empty() { None } else { Some(command) };
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ Configuração salva");
            }

            if show || !changed {
                println!("Configuração:");
                println!("  Pasta de dados: {}", config.data_dir.display());
                println!("  Pasta de saída: {}", config.output_dir().display());
                println!("  Modelo: {}", config.template_path().display());
                println!("  Formato do valor: {}", config.currency_format);
                println!("  Células estritas: {}", config.strict_cells);
                println!("  Modo desenvolvimento: {}", config.dev_mode);
                println!(
                    "  Comando de impressão: {}",
                    config.print_command.as_deref().unwrap_or("(padrão do sistema)")
                );
            }
        }
    }

    Ok(())
}
