use eframe::egui::{self, Color32, RichText};
use eframe::egui::text::{CCursor, CCursorRange};

use nota_credito::AppContext;
use nota_credito_common::{
    filter_clients, mask_currency, mask_date, Client, DescriptionTemplate, MaskedText, Supplier,
};

use crate::io::{generate, pick_template_file, print_latest, reload_state};
use crate::model::{AppState, ClientDraft, NoteDraft};

const STATUS_OK: Color32 = Color32::from_rgb(120, 200, 140);
const STATUS_WARN: Color32 = Color32::from_rgb(246, 196, 69);
const STATUS_ERR: Color32 = Color32::from_rgb(230, 110, 110);

type MaskFn = fn(&str, usize, &str) -> MaskedText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Ok,
    Warn,
    Err,
}

pub struct DesktopApp {
    ctx: AppContext,
    state: AppState,
    client_draft: ClientDraft,
    note: NoteDraft,
    supplier_draft: Supplier,
    template_name: String,
    pending_delete: Option<Client>,
    status: String,
    status_kind: StatusKind,
}

impl DesktopApp {
    pub fn new(ctx: AppContext) -> Self {
        let mut state = AppState::default();
        let load_error = reload_state(&ctx, &mut state).err();
        let mut app = Self {
            ctx,
            note: NoteDraft::from_state(&state.program),
            state,
            client_draft: ClientDraft::default(),
            supplier_draft: Supplier::new("", ""),
            template_name: String::new(),
            pending_delete: None,
            status: String::new(),
            status_kind: StatusKind::Ok,
        };
        if let Some(err) = load_error {
            app.set_status(StatusKind::Err, format!("Falha ao carregar dados: {err:#}"));
        }
        app
    }

    fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status = message.into();
        self.status_kind = kind;
    }

    fn reload(&mut self) {
        match reload_state(&self.ctx, &mut self.state) {
            Ok(()) => {
                self.note.invoice_number = self.state.program.next_invoice_number.to_string();
                self.set_status(StatusKind::Ok, "Dados recarregados");
            }
            Err(err) => self.set_status(StatusKind::Err, format!("Falha ao recarregar: {err:#}")),
        }
    }

    fn reload_lists(&mut self) {
        self.state.clients = self.ctx.clients.load();
        self.state.suppliers = self.ctx.suppliers.load();
        self.state.templates = self.ctx.templates.load();
    }

    fn save_client(&mut self) {
        let client = self.client_draft.to_client();
        let result = match self.client_draft.editing.clone() {
            Some(original) => self.ctx.clients.update(&original, client.clone()),
            None => self.ctx.clients.add(client.clone()),
        };
        match result {
            Ok(()) => {
                self.reload_lists();
                self.state.selected_client = Some(client.code.clone());
                self.client_draft = ClientDraft::default();
                self.set_status(StatusKind::Ok, format!("Cliente salvo: {}", client.display_label()));
            }
            Err(err) => self.set_status(StatusKind::Err, err.to_string()),
        }
    }

    fn delete_client(&mut self, client: &Client) {
        match self.ctx.clients.remove(&client.code) {
            Ok(removed) => {
                self.reload_lists();
                if self.state.selected_client.as_deref() == Some(removed.code.as_str()) {
                    self.state.selected_client = None;
                }
                if self.client_draft.editing.as_deref() == Some(removed.code.as_str()) {
                    self.client_draft = ClientDraft::default();
                }
                self.set_status(StatusKind::Ok, format!("Cliente excluído: {}", removed.display_label()));
            }
            Err(err) => self.set_status(StatusKind::Err, err.to_string()),
        }
    }

    fn save_supplier(&mut self) {
        let supplier = Supplier::new(
            self.supplier_draft.name.trim(),
            self.supplier_draft.template_file.trim(),
        );
        match self.ctx.suppliers.add(supplier.clone()) {
            Ok(()) => {
                self.reload_lists();
                self.supplier_draft = Supplier::new("", "");
                self.set_status(StatusKind::Ok, format!("Fornecedor salvo: {}", supplier.name));
            }
            Err(err) => self.set_status(StatusKind::Err, err.to_string()),
        }
    }

    fn save_description_template(&mut self) {
        let template = DescriptionTemplate::new(self.template_name.trim(), self.note.description.trim());
        match self.ctx.templates.add(template.clone()) {
            Ok(()) => {
                self.reload_lists();
                self.template_name.clear();
                self.set_status(StatusKind::Ok, format!("Modelo salvo: {}", template.name));
            }
            Err(err) => self.set_status(StatusKind::Err, err.to_string()),
        }
    }

    fn run_generate(&mut self) {
        match generate(&self.ctx, &mut self.state, &self.note) {
            Ok(report) => {
                self.note.reset_after_generate(&self.state.program);
                let mut message = format!("Nota salva em {}", report.output_path.display());
                let mut kind = StatusKind::Ok;
                if !report.skipped.is_empty() {
                    let cells: Vec<&str> = report.skipped.iter().map(|s| s.cell.as_str()).collect();
                    message.push_str(&format!(" (células ignoradas: {})", cells.join(", ")));
                    kind = StatusKind::Warn;
                }
                self.set_status(kind, message);
                if self.note.print_after {
                    self.run_print();
                }
            }
            Err(err) => self.set_status(StatusKind::Err, format!("{err:#}")),
        }
    }

    fn run_print(&mut self) {
        let known = self.state.last_note.clone();
        match print_latest(&self.ctx, known.as_deref()) {
            Ok(path) => self.set_status(StatusKind::Ok, format!("Enviado para impressão: {}", path.display())),
            // a nota já está salva
            Err(err) => self.set_status(StatusKind::Warn, format!("{err:#}")),
        }
    }

    fn render_clients(&mut self, ui: &mut egui::Ui) {
        ui.heading("Clientes");
        ui.horizontal(|ui| {
            ui.label("Buscar");
            ui.text_edit_singleline(&mut self.state.search);
        });
        ui.separator();

        let mut clicked: Option<Client> = None;
        let mut edit: Option<Client> = None;
        let mut delete: Option<Client> = None;
        egui::ScrollArea::vertical()
            .max_height((ui.available_height() - 150.0).max(120.0))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let found = filter_clients(&self.state.clients, &self.state.search);
                if found.is_empty() {
                    ui.label(RichText::new("Nenhum cliente").color(Color32::from_gray(150)));
                }
                for client in found {
                    let selected = self.state.selected_client.as_deref() == Some(client.code.as_str());
                    let response = ui.selectable_label(selected, client.display_label());
                    if response.clicked() {
                        clicked = Some(client.clone());
                    }
                    response.context_menu(|ui| {
                        if ui.button("Editar").clicked() {
                            edit = Some(client.clone());
                            ui.close_menu();
                        }
                        if ui.button("Excluir").clicked() {
                            delete = Some(client.clone());
                            ui.close_menu();
                        }
                    });
                }
            });

        if let Some(client) = clicked {
            self.state.selected_client = Some(client.code);
        }
        if let Some(client) = edit {
            self.client_draft = ClientDraft::edit(&client);
        }
        if delete.is_some() {
            self.pending_delete = delete;
        }

        ui.separator();
        let title = if self.client_draft.editing.is_some() { "Editar cliente" } else { "Novo cliente" };
        ui.label(RichText::new(title).strong());
        egui::Grid::new("client_form").num_columns(2).show(ui, |ui| {
            ui.label("Código");
            ui.text_edit_singleline(&mut self.client_draft.code);
            ui.end_row();
            ui.label("Nome");
            ui.text_edit_singleline(&mut self.client_draft.name);
            ui.end_row();
        });
        ui.horizontal(|ui| {
            if ui.button("Salvar").clicked() {
                self.save_client();
            }
            if self.client_draft.editing.is_some() && ui.button("Cancelar").clicked() {
                self.client_draft = ClientDraft::default();
            }
        });
    }

    fn render_note(&mut self, ui: &mut egui::Ui) {
        ui.heading("Nota de Crédito");
        ui.separator();

        let selected_label = self
            .state
            .selected_client
            .as_deref()
            .and_then(|code| self.state.clients.iter().find(|c| c.code == code))
            .map(|c| c.display_label())
            .unwrap_or_else(|| "Selecione um cliente na lista".to_string());

        egui::Grid::new("note_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Cliente");
                ui.label(RichText::new(selected_label).strong());
                ui.end_row();

                ui.label("Data");
                masked_edit(ui, "note_date", &mut self.note.date, mask_date);
                ui.end_row();

                ui.label("Número da Fatura");
                ui.text_edit_singleline(&mut self.note.invoice_number);
                ui.end_row();

                ui.label("Valor (R$)");
                masked_edit(ui, "note_amount", &mut self.note.amount, mask_currency);
                ui.end_row();

                ui.label("Fornecedor");
                let supplier_text = self.note.supplier.clone().unwrap_or_else(|| "(modelo padrão)".to_string());
                egui::ComboBox::from_id_source("note_supplier")
                    .selected_text(supplier_text)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.note.supplier, None, "(modelo padrão)");
                        for supplier in &self.state.suppliers {
                            ui.selectable_value(
                                &mut self.note.supplier,
                                Some(supplier.name.clone()),
                                &supplier.name,
                            );
                        }
                    });
                ui.end_row();

                ui.label("Modelo de descrição");
                let mut chosen: Option<String> = None;
                egui::ComboBox::from_id_source("note_template")
                    .selected_text("Aplicar modelo…")
                    .show_ui(ui, |ui| {
                        for template in &self.state.templates {
                            if ui.selectable_label(false, &template.name).clicked() {
                                chosen = Some(template.text.clone());
                            }
                        }
                    });
                if let Some(text) = chosen {
                    self.note.description = text;
                }
                ui.end_row();
            });

        ui.label("Descrição / Histórico");
        ui.add(
            egui::TextEdit::multiline(&mut self.note.description)
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        ui.horizontal(|ui| {
            ui.label("Salvar descrição como modelo");
            ui.text_edit_singleline(&mut self.template_name);
            if ui
                .add_enabled(!self.template_name.trim().is_empty(), egui::Button::new("Salvar modelo"))
                .clicked()
            {
                self.save_description_template();
            }
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.note.print_after, "Imprimir após gerar");
            if ui.button(RichText::new("Gerar Nota").strong()).clicked() {
                self.run_generate();
            }
            if ui.button("Imprimir última").clicked() {
                self.run_print();
            }
        });

        ui.add_space(12.0);
        ui.collapsing("Fornecedores", |ui| {
            for supplier in &self.state.suppliers {
                ui.label(format!("{} → {}", supplier.name, supplier.template_file));
            }
            ui.separator();
            egui::Grid::new("supplier_form").num_columns(2).show(ui, |ui| {
                ui.label("Nome");
                ui.text_edit_singleline(&mut self.supplier_draft.name);
                ui.end_row();
                ui.label("Modelo XLSX");
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.supplier_draft.template_file);
                    if ui.button("…").clicked() {
                        if let Some(file) = pick_template_file(&self.ctx.config.data_dir) {
                            self.supplier_draft.template_file = file;
                        }
                    }
                });
                ui.end_row();
            });
            if ui.button("Adicionar fornecedor").clicked() {
                self.save_supplier();
            }
        });
    }

    fn render_delete_confirm(&mut self, ctx: &egui::Context) {
        let Some(client) = self.pending_delete.clone() else {
            return;
        };
        let mut answer: Option<bool> = None;
        egui::Window::new("Confirmar exclusão")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("Excluir o cliente {}?", client.display_label()));
                ui.horizontal(|ui| {
                    if ui.button("Excluir").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancelar").clicked() {
                        answer = Some(false);
                    }
                });
            });
        match answer {
            Some(true) => {
                self.pending_delete = None;
                self.delete_client(&client);
            }
            Some(false) => self.pending_delete = None,
            None => {}
        }
    }
}

/// 入力ごとにマスクを掛け直し、カーソル位置を保つ
fn masked_edit(ui: &mut egui::Ui, id: &str, text: &mut String, mask: MaskFn) -> egui::Response {
    let previous = text.clone();
    let output = egui::TextEdit::singleline(text).id_source(id).show(ui);
    if output.response.changed() {
        let cursor = output
            .cursor_range
            .map(|range| range.primary.ccursor.index)
            .unwrap_or_else(|| text.chars().count());
        let masked = mask(text, cursor, &previous);
        *text = masked.text;

        let mut state = output.state;
        state
            .cursor
            .set_char_range(Some(CCursorRange::one(CCursor::new(masked.cursor))));
        state.store(ui.ctx(), output.response.id);
    }
    output.response
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Arquivo", |ui| {
                    if ui.button("Recarregar dados").clicked() {
                        self.reload();
                        ui.close_menu();
                    }
                    if ui.button("Imprimir última nota").clicked() {
                        self.run_print();
                        ui.close_menu();
                    }
                });
                ui.separator();
                ui.label(
                    RichText::new(format!("Próxima fatura: {}", self.state.program.next_invoice_number))
                        .color(Color32::from_gray(170)),
                );
                if !self.status.is_empty() {
                    ui.separator();
                    let color = match self.status_kind {
                        StatusKind::Ok => STATUS_OK,
                        StatusKind::Warn => STATUS_WARN,
                        StatusKind::Err => STATUS_ERR,
                    };
                    ui.label(RichText::new(&self.status).color(color));
                }
            });
        });

        egui::SidePanel::left("clients")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                self.render_clients(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_note(ui);
            });
        });

        self.render_delete_confirm(ctx);
    }
}
