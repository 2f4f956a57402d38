//! The editor session: one object owning the graph model, the icon registry,
//! the view state and the persistence adapter. Constructed once and passed by
//! reference to whatever surface hosts it; there are no ambient singletons.

use crate::persist::{FileAdapter, SaveFile};
use floe_core::{
    Applied, Command, FlowsheetDescription, FlowsheetGraph, IconRegistry, bootstrap,
};
use floe_render::{
    InteractionState, PointerEvent, Scene, SvgRenderOptions, ViewState, build_scene,
    render_scene_svg,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] floe_core::Error),
    #[error(transparent)]
    Render(#[from] floe_render::Error),
    #[error("a load is already awaiting its file read")]
    LoadInProgress,
    #[error("file read failed: {0}")]
    Read(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub struct EditorSession {
    title: String,
    graph: FlowsheetGraph,
    icons: IconRegistry,
    view: ViewState,
    interaction: InteractionState,
    files: FileAdapter,
}

impl EditorSession {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            graph: FlowsheetGraph::new(),
            icons: IconRegistry::default(),
            view: ViewState::default(),
            interaction: InteractionState::default(),
            files: FileAdapter::default(),
        }
    }

    pub fn with_icon_registry(mut self, icons: IconRegistry) -> Self {
        self.icons = icons;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn graph(&self) -> &FlowsheetGraph {
        &self.graph
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn icons(&self) -> &IconRegistry {
        &self.icons
    }

    /// Populates the graph from the producer's initial description,
    /// discarding whatever was on the canvas.
    pub fn bootstrap(&mut self, description: &FlowsheetDescription) -> Result<()> {
        self.graph = bootstrap(description, &self.icons)?;
        self.view = ViewState::default();
        Ok(())
    }

    /// Applies one mutation command to the graph.
    pub fn apply(&mut self, command: Command) -> Result<Applied> {
        Ok(floe_core::apply(&mut self.graph, &self.icons, command)?)
    }

    /// Feeds a pointer event through the interaction surface and applies
    /// every command it emitted before returning, so the model is current by
    /// the time the caller renders the next frame.
    pub fn pointer(&mut self, event: PointerEvent) -> Result<Vec<Applied>> {
        let scene = build_scene(&self.graph, &self.view)?;
        let commands = self.interaction.pointer(&scene, &mut self.view, event);
        let mut applied = Vec::with_capacity(commands.len());
        for command in commands {
            applied.push(self.apply(command)?);
        }
        Ok(applied)
    }

    pub fn scene(&self) -> Result<Scene> {
        Ok(build_scene(&self.graph, &self.view)?)
    }

    pub fn render_svg(&self, options: &SvgRenderOptions) -> Result<String> {
        Ok(render_scene_svg(&self.scene()?, options))
    }

    /// Snapshots the graph into a downloadable file payload.
    pub fn save(&self) -> Result<SaveFile> {
        self.files.save(&self.title, &self.graph)
    }

    /// Loads already-read bytes synchronously. The graph is replaced only if
    /// the whole document validates; otherwise it is untouched.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let ticket = self.files.begin_load()?;
        self.finish_load(|files, graph| files.complete_load(ticket, bytes, graph))
    }

    /// Drives a load across an asynchronous file read. The session stays
    /// usable while the read is pending; a second load started in that window
    /// is rejected rather than interleaved.
    pub async fn load_from<R>(&mut self, read: R) -> Result<()>
    where
        R: Future<Output = std::io::Result<Vec<u8>>>,
    {
        let ticket = self.files.begin_load()?;
        match read.await {
            Ok(bytes) => {
                self.finish_load(|files, graph| files.complete_load(ticket, &bytes, graph))
            }
            Err(err) => {
                self.files.abort_load(ticket);
                Err(Error::Read(err))
            }
        }
    }

    /// True while a load is between `begin` and its file-read completion.
    pub fn load_pending(&self) -> bool {
        self.files.load_pending()
    }

    fn finish_load<F>(&mut self, commit: F) -> Result<()>
    where
        F: FnOnce(&mut FileAdapter, &mut FlowsheetGraph) -> Result<()>,
    {
        commit(&mut self.files, &mut self.graph)?;
        // Selection and gestures referred to the replaced model.
        self.view = ViewState::default();
        self.interaction = InteractionState::default();
        Ok(())
    }
}
