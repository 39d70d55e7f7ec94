impl<IN> ReaderApp<IN>
where
    IN: InputProvider,
{
    pub fn with_screen<F>(&self, f: F)
    where
        F: FnOnce(Screen<'_>),
    {
        let snapshot = self.session.snapshot();
        let title = if self.title.is_empty() {
            self.app_title
        } else {
            self.title.as_str()
        };

        let (Some(cursor), Some(word)) = (snapshot.cursor, snapshot.current_unit()) else {
            f(Screen::Empty {
                title: self.app_title,
                hint: EMPTY_HINT,
                wpm: snapshot.wpm,
                emphasis: self.emphasis,
                stats: snapshot.stats,
            });
            return;
        };

        let info = word_info(word, self.emphasis);
        let label = progress_label(snapshot.cursor, snapshot.units.len());

        f(Screen::Reading {
            title,
            layout: info.layout(),
            delay: info.delay_factor,
            wpm: snapshot.wpm,
            playing: snapshot.playing,
            emphasis: self.emphasis,
            progress_pct: progress_percent(snapshot.cursor, snapshot.units.len()),
            progress_label: label.as_str(),
            gallery: Gallery::new(snapshot.units, cursor, GALLERY_RADIUS),
            stats: snapshot.stats,
        });
    }
}
